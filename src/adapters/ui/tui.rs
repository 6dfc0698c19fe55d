//! Implements InputPort. Drives the collect → analyze → present → reset loop.
//!
//! Text comes from the raw-mode editor, the image from an inquire path
//! prompt, the loading indicator is an indicatif spinner.

use crate::adapters::ui::{banner, editor, input, present};
use crate::domain::{DomainError, ImageAttachment, SessionState, StudyRequest};
use crate::ports::{InputPort, TutorPort};
use crate::usecases::StudySession;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use inquire::{Confirm, Select, Text};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

const PROMPT: &str = "输入荷兰语单词、句子、文章，或粘贴网址：";

const AGAIN_OPTION: &str = "再分析一个 (Analyze another)";
const QUIT_OPTION: &str = "退出 (Quit)";

/// Theme accent shared with the banner gradient.
fn accent() -> Color {
    let (r, g, b) = banner::DUTCH_ORANGE;
    Color::Rgb { r, g, b }
}

/// Applies the orange theme to all subsequent inquire prompts.
/// Called once from `init_ui`; safe to call again.
pub fn apply_theme() {
    let mut render_config = RenderConfig::default_colored();
    render_config.prompt_prefix = Styled::new("»").with_fg(accent());
    render_config.answered_prompt_prefix = Styled::new("»").with_fg(accent());
    render_config.highlighted_option_prefix = Styled::new(">").with_fg(accent());
    render_config.selected_option = Some(StyleSheet::new().with_fg(accent()));
    render_config.answer = StyleSheet::new()
        .with_fg(accent())
        .with_attr(Attributes::BOLD);
    inquire::set_global_render_config(render_config);
}

/// TUI adapter. One session per run.
pub struct TuiInputPort {
    session: Mutex<StudySession>,
}

impl TuiInputPort {
    pub fn new(tutor: Arc<dyn TutorPort>) -> Self {
        Self {
            session: Mutex::new(StudySession::new(tutor)),
        }
    }

    /// Collect one submission. Returns `None` when the user backs out.
    fn collect(&self) -> Result<Option<StudyRequest>, DomainError> {
        loop {
            let mut collector = input::InputCollector::new();

            let Some(text) = editor::read_text(PROMPT)? else {
                return Ok(None);
            };
            collector.set_text(text);

            let attach = Confirm::new("附加图片? (attach an image)")
                .with_default(false)
                .prompt()
                .map_err(|e| DomainError::Ui(e.to_string()))?;
            if attach {
                match self.pick_image()? {
                    Some(image) => collector.set_image(image),
                    None => collector.clear_image(),
                }
            }

            match collector.submit() {
                Some(request) => return Ok(Some(request)),
                // Validation is silent: no error banner, just ask again.
                None => {
                    debug!("empty submission ignored");
                    println!("请输入文本或附加图片。");
                }
            }
        }
    }

    /// Prompt for an image path and load it. Returns `None` when the user
    /// leaves the path empty or the file is not an accepted image.
    fn pick_image(&self) -> Result<Option<ImageAttachment>, DomainError> {
        let path_input = Text::new("图片路径 (jpg/png/webp/gif/bmp/heic):")
            .prompt()
            .map_err(|e| DomainError::Ui(e.to_string()))?;
        let path_input = path_input.trim();
        if path_input.is_empty() {
            return Ok(None);
        }

        match load_image(Path::new(path_input)) {
            Ok(image) => {
                println!("已附加 {} ({} bytes)", image.file_name, image.data.len());
                Ok(Some(image))
            }
            Err(e) => {
                present::render_error(e.message());
                Ok(None)
            }
        }
    }
}

/// Read an image file into an attachment, validating the extension maps to
/// an image MIME type first.
pub fn load_image(path: &Path) -> Result<ImageAttachment, DomainError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let mime_type = input::image_mime_for_extension(extension)
        .ok_or_else(|| DomainError::Input(format!("不支持的文件类型: {}", path.display())))?;

    let data = std::fs::read(path)
        .map_err(|e| DomainError::Input(format!("读取图片失败 {}: {}", path.display(), e)))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();

    Ok(ImageAttachment::new(data, mime_type, file_name))
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let mut session = self.session.lock().await;

        loop {
            let Some(request) = self.collect()? else {
                return Ok(());
            };

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner} {msg}")
                    .map_err(|e| DomainError::Ui(e.to_string()))?,
            );
            spinner.set_message("分析中... 正在生成学习资料");
            spinner.enable_steady_tick(Duration::from_millis(80));

            session.analyze(request).await;
            spinner.finish_and_clear();

            match session.state() {
                SessionState::Success(guide) => present::render_guide(guide),
                SessionState::Failure(message) => present::render_error(message),
                // Unreachable after a completed analyze; nothing to show.
                SessionState::Idle | SessionState::Loading => {}
            }

            let choice = Select::new("接下来?", vec![AGAIN_OPTION, QUIT_OPTION])
                .prompt()
                .map_err(|e| DomainError::Ui(e.to_string()))?;

            // Reset is reachable from Success and Failure; prior input is
            // discarded either way.
            session.reset();
            if choice == QUIT_OPTION {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_uses_banner_accent_and_reapplies_cleanly() {
        assert!(matches!(
            accent(),
            Color::Rgb {
                r: 0xff,
                g: 0x6a,
                b: 0x00
            }
        ));
        // Global render config: applying twice must not panic or poison it.
        apply_theme();
        apply_theme();
    }

    #[test]
    fn load_image_rejects_non_image_extension() {
        let err = load_image(Path::new("/tmp/aantekeningen.pdf")).unwrap_err();
        assert!(matches!(err, DomainError::Input(_)));
    }

    #[test]
    fn load_image_rejects_missing_file() {
        let err = load_image(Path::new("/nonexistent/vogel.png")).unwrap_err();
        assert!(matches!(err, DomainError::Input(_)));
    }

    #[test]
    fn load_image_reads_bytes_and_mime() {
        let dir = std::env::temp_dir().join("oranje-studie-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pixel.png");
        std::fs::write(&path, [0x89, 0x50, 0x4E, 0x47]).unwrap();

        let image = load_image(&path).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.file_name, "pixel.png");
        assert_eq!(image.data, vec![0x89, 0x50, 0x4E, 0x47]);

        let _ = std::fs::remove_file(&path);
    }
}
