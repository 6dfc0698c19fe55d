//! Mock tutor for running without API calls.
//!
//! Returns a canned study guide for development and testing purposes.

use crate::domain::{DomainError, StudyGuide, StudyRequest};
use crate::ports::TutorPort;
use std::time::Duration;
use tracing::info;

/// Mock tutor adapter.
///
/// Returns a predetermined bilingual guide without touching the network.
/// Simulates latency with a configurable delay.
pub struct MockTutor {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockTutor {
    /// Create a new mock tutor with default delay (100ms).
    pub fn new() -> Self {
        Self { delay_ms: 100 }
    }

    /// Create a mock tutor with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

impl Default for MockTutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TutorPort for MockTutor {
    async fn analyze(&self, request: &StudyRequest) -> Result<StudyGuide, DomainError> {
        info!(
            text_len = request.text.len(),
            has_image = request.image.is_some(),
            "[MOCK] Simulating study-guide generation"
        );

        // Simulate network delay
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        let subject = match &request.image {
            Some(image) => format!("图片 {}", image.file_name),
            None => {
                let mut preview: String = request.text.trim().chars().take(40).collect();
                if request.text.trim().chars().count() > 40 {
                    preview.push('…');
                }
                format!("“{}”", preview)
            }
        };

        let markdown = format!(
            "# 学习摘要 (Summary)\n\
             [MOCK] 这是针对 {} 的模拟学习资料。设置 STUDIE_API_KEY 后可获得真实分析。\n\n\
             ## 沉浸式阅读 (Immersion Reading)\n\
             > Dit is een voorbeeldzin.\n\
             > 这是一个例句。\n\n\
             ## 重点词汇 (Key Vocabulary)\n\
             | 荷兰语 | 词性 | 中文 | 复数 |\n\
             |---|---|---|---|\n\
             | **de zin** | 名词 | 句子 | zinnen |\n\n\
             ## 语法解析 (Grammar Notes)\n\
             1. [MOCK] 陈述句的基本语序：主语 + 动词 + 其他。\n\n\
             ## 练习 (Practice)\n\
             1. 请翻译：Dit is een voorbeeldzin.\n\
             2. 写出 de zin 的复数形式。\n",
            subject
        );

        // No search tool, so no grounded sources.
        Ok(StudyGuide::new(markdown, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageAttachment;

    #[tokio::test]
    async fn test_mock_tutor_text() {
        let tutor = MockTutor::with_delay(10);
        let guide = tutor
            .analyze(&StudyRequest::text_only("Het is vandaag mooi weer."))
            .await
            .unwrap();

        assert!(guide.markdown.starts_with("# 学习摘要"));
        assert!(guide.markdown.contains("Het is vandaag mooi weer."));
        assert!(guide.sources.is_empty());
    }

    #[tokio::test]
    async fn test_mock_tutor_image() {
        let tutor = MockTutor::with_delay(10);
        let image = ImageAttachment::new(vec![1, 2, 3], "image/png", "vogel.png");
        let guide = tutor
            .analyze(&StudyRequest::with_image("", image))
            .await
            .unwrap();

        assert!(guide.markdown.contains("vogel.png"));
    }
}
