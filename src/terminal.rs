//! Terminal queries made before the UI takes over the screen.
//!
//! Background color detection uses OSC 11. The pixel width feeds the
//! layout units of the preview controller.

use std::time::Duration;

use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};

use crate::highlight::HighlightBackground;

const OSC11_TIMEOUT: Duration = Duration::from_millis(75);

/// Pixel width reported by the terminal, or 0 when unknown.
pub fn reported_pixel_width() -> u16 {
    terminal::window_size().map_or(0, |size| size.width)
}

/// Ask the terminal for its background color and classify it.
///
/// Returns `None` when the terminal does not answer in time.
pub fn detect_background() -> Option<HighlightBackground> {
    let raw = enable_raw_mode();
    let reply = query_background_color();
    if raw.is_ok() {
        let _ = disable_raw_mode();
    }
    match reply {
        Ok(Some((r, g, b))) => Some(theme_from_rgb(r, g, b)),
        Ok(None) => None,
        Err(err) => {
            tracing::debug!(%err, "background query failed");
            None
        }
    }
}

// Windows consoles keep a reader thread blocked on stdin after the query,
// which starves crossterm of input. Skip detection there.
#[cfg(not(unix))]
fn query_background_color() -> std::io::Result<Option<(u8, u8, u8)>> {
    Ok(None)
}

#[cfg(unix)]
fn query_background_color() -> std::io::Result<Option<(u8, u8, u8)>> {
    use std::io::Write;
    use std::sync::mpsc;

    let mut tty = std::fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open("/dev/tty")?;
    let mut reader = tty.try_clone()?;
    // DA1 follows OSC 11 so even terminals that ignore OSC 11 end the reply.
    tty.write_all(b"\x1b]11;?\x07\x1b[c")?;
    tty.flush()?;

    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(read_until_device_attributes(&mut reader));
    });

    Ok(rx
        .recv_timeout(OSC11_TIMEOUT)
        .ok()
        .and_then(|bytes| parse_osc11_reply(&String::from_utf8_lossy(&bytes))))
}

/// Read one byte at a time until the DA1 reply closes the exchange.
///
/// Stops at end of input or on error. Nothing past the DA1 terminator is
/// consumed, so keys typed after the query stay with the event reader.
#[cfg(any(unix, test))]
fn read_until_device_attributes(reader: &mut impl std::io::Read) -> Vec<u8> {
    let mut reply = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => break,
            Ok(_) => {
                reply.push(byte[0]);
                if ends_device_attributes(&reply) {
                    break;
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => {}
            Err(_) => break,
        }
    }
    reply
}

/// True when `reply` ends with `ESC [ ? <digits and ;> c`.
#[cfg(any(unix, test))]
fn ends_device_attributes(reply: &[u8]) -> bool {
    if reply.last() != Some(&b'c') {
        return false;
    }
    let Some(start) = reply.windows(3).rposition(|w| w == b"\x1b[?") else {
        return false;
    };
    reply[start + 3..reply.len() - 1]
        .iter()
        .all(|b| b.is_ascii_digit() || *b == b';')
}

/// Parse `ESC ] 11 ; rgb:RRRR/GGGG/BBBB` terminated by BEL or ST.
pub fn parse_osc11_reply(reply: &str) -> Option<(u8, u8, u8)> {
    let (_, data) = reply.split_once("rgb:")?;
    let mut channels = data.split(['/', '\x07', '\x1b']);
    let r = parse_channel(channels.next()?)?;
    let g = parse_channel(channels.next()?)?;
    let b = parse_channel(channels.next()?)?;
    Some((r, g, b))
}

/// Channels come as 1 to 4 hex digits; keep the most significant byte.
#[allow(clippy::cast_possible_truncation)]
fn parse_channel(hex: &str) -> Option<u8> {
    let hex = hex.trim();
    if hex.is_empty() || hex.len() > 4 {
        return None;
    }
    let value = u16::from_str_radix(hex, 16).ok()?;
    let scaled = match hex.len() {
        1 => value * 0x11,
        2 => value,
        3 => value >> 4,
        _ => value >> 8,
    };
    Some(scaled as u8)
}

pub fn theme_from_rgb(r: u8, g: u8, b: u8) -> HighlightBackground {
    let luma = 0.0722f32.mul_add(
        f32::from(b),
        0.2126f32.mul_add(f32::from(r), 0.7152 * f32::from(g)),
    );
    if luma >= 140.0 {
        HighlightBackground::Light
    } else {
        HighlightBackground::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_four_digit_reply_with_bel() {
        let reply = "\x1b]11;rgb:ffff/8080/0000\x07";
        assert_eq!(parse_osc11_reply(reply), Some((0xff, 0x80, 0x00)));
    }

    #[test]
    fn test_parse_two_digit_reply_with_st() {
        let reply = "\x1b]11;rgb:1e/1e/2e\x1b\\";
        assert_eq!(parse_osc11_reply(reply), Some((0x1e, 0x1e, 0x2e)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_osc11_reply("no color here"), None);
        assert_eq!(parse_osc11_reply("rgb:zz/00/00"), None);
        assert_eq!(parse_osc11_reply("rgb:00/00"), None);
    }

    #[test]
    fn test_single_digit_channel_is_scaled() {
        assert_eq!(parse_osc11_reply("rgb:f/0/8\x07"), Some((0xff, 0x00, 0x88)));
    }

    #[test]
    fn test_theme_from_rgb() {
        assert_eq!(theme_from_rgb(255, 255, 255), HighlightBackground::Light);
        assert_eq!(theme_from_rgb(0, 0, 0), HighlightBackground::Dark);
        assert_eq!(theme_from_rgb(0x23, 0x23, 0x23), HighlightBackground::Dark);
    }

    #[test]
    fn test_reply_with_color_then_device_attributes() {
        let mut input =
            std::io::Cursor::new(b"\x1b]11;rgb:ffff/ffff/ffff\x07\x1b[?62;22c".to_vec());
        let reply = read_until_device_attributes(&mut input);
        assert_eq!(
            parse_osc11_reply(&String::from_utf8_lossy(&reply)),
            Some((0xff, 0xff, 0xff))
        );
    }

    #[test]
    fn test_device_attributes_alone_ends_read_without_color() {
        let mut input = std::io::Cursor::new(b"\x1b[?1;2c".to_vec());
        let reply = read_until_device_attributes(&mut input);
        assert_eq!(reply, b"\x1b[?1;2c");
        assert_eq!(parse_osc11_reply(&String::from_utf8_lossy(&reply)), None);
    }

    #[test]
    fn test_keys_after_reply_are_left_unread() {
        let data = b"\x1b]11;rgb:00/00/00\x1b\\\x1b[?6cjk".to_vec();
        let reply_len = data.len() - 2;
        let mut input = std::io::Cursor::new(data);
        let reply = read_until_device_attributes(&mut input);
        assert_eq!(reply.len(), reply_len);
        assert_eq!(input.position(), reply_len as u64);
    }

    #[test]
    fn test_end_of_input_stops_reading() {
        let mut input = std::io::Cursor::new(b"\x1b]11;rgb:00".to_vec());
        let reply = read_until_device_attributes(&mut input);
        assert_eq!(reply, b"\x1b]11;rgb:00");
    }

    #[test]
    fn test_hex_c_in_color_does_not_end_read() {
        assert!(!ends_device_attributes(b"\x1b]11;rgb:cccc/cccc/cc"));
        assert!(!ends_device_attributes(b"\x1b[?1;2\x1b]11;rgb:c"));
        assert!(ends_device_attributes(b"\x1b]11;rgb:cc/cc/cc\x07\x1b[?c"));
    }
}
