//! Dutch-orange ASCII banner with gradient (ORANJE).
//! Uses the figlet standard font embedded in figlet-rs.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Dutch Orange (#ff6a00). Also the accent for the inquire theme.
pub(crate) const DUTCH_ORANGE: (u8, u8, u8) = (0xff, 0x6a, 0x00);
/// Warm Yellow (#ffd54f).
const WARM_YELLOW: (u8, u8, u8) = (0xff, 0xd5, 0x4f);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints the welcome banner: "ORANJE" in figlet ASCII with a gradient from
/// Dutch Orange to Warm Yellow, then version and the tagline.
pub fn print_welcome() {
    let mut out = stdout();
    let Some(art) = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("ORANJE").map(|figure| figure.to_string()))
    else {
        // Banner is cosmetic; never fail startup over it.
        println!("ORANJE STUDIE");
        return;
    };
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(DUTCH_ORANGE, WARM_YELLOW, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: DUTCH_ORANGE.0,
        g: DUTCH_ORANGE.1,
        b: DUTCH_ORANGE.2,
    }));
    let _ = out.execute(Print(format!("v{}\r\n", version)));
    let _ = out.execute(Print("荷兰语 A2-B1 备考助手\r\n"));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
