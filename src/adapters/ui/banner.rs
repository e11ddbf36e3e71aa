//! Gold gradient ASCII banner (GOLD DAY).

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Deep gold (#b8860b).
const DARK_GOLD: (u8, u8, u8) = (0xb8, 0x86, 0x0b);
/// Pale gold (#ffd700).
const BRIGHT_GOLD: (u8, u8, u8) = (0xff, 0xd7, 0x00);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints "GOLD DAY" in the standard figlet font with a dark-to-bright gold gradient,
/// then the version. Falls back to plain text if the font cannot render.
pub fn print_welcome() {
    let mut out = stdout();
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("GOLD DAY").map(|f| f.to_string()))
        .unwrap_or_else(|| "GOLD DAY".to_string());
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(DARK_GOLD, BRIGHT_GOLD, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: BRIGHT_GOLD.0,
        g: BRIGHT_GOLD.1,
        b: BRIGHT_GOLD.2,
    }));
    let _ = out.execute(Print(format!("v{}\r\n", version)));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_endpoints() {
        assert_eq!(lerp_rgb(DARK_GOLD, BRIGHT_GOLD, 0.0), DARK_GOLD);
        assert_eq!(lerp_rgb(DARK_GOLD, BRIGHT_GOLD, 1.0), BRIGHT_GOLD);
    }
}
