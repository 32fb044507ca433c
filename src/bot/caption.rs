// Caption formatting for re-uploaded videos

use time::macros::format_description;
use time::OffsetDateTime;

use crate::downloader::VideoRecord;

/// Telegram rejects captions longer than this, counted in UTF-16 code units
pub const MAX_CAPTION_UTF16: usize = 1024;

/// Render the caption posted under a video. Lines without data are skipped.
pub fn format_caption(record: &VideoRecord) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(text) = record.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        lines.push(text.to_string());
    }

    if let Some(music) = &record.music {
        lines.push(format!("🎵 {}", music));
    }

    let stats: Vec<String> = [
        ("❤️", record.digg_count),
        ("💬", record.comment_count),
        ("▶️", record.play_count),
        ("🔁", record.share_count),
    ]
    .iter()
    .filter_map(|(icon, count)| count.map(|n| format!("{} {}", icon, compact_count(n))))
    .collect();
    if !stats.is_empty() {
        lines.push(stats.join(" "));
    }

    let byline: Vec<String> = [
        record.author.as_ref().map(|a| format!("👤 @{}", a)),
        record.create_time.and_then(upload_date),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !byline.is_empty() {
        lines.push(byline.join(" · "));
    }

    truncate(lines.join("\n"), MAX_CAPTION_UTF16)
}

/// 999 -> "999", 1200 -> "1.2K", 3_400_000 -> "3.4M"
pub fn compact_count(n: u64) -> String {
    const UNITS: [(u64, &str); 3] = [(1_000_000_000, "B"), (1_000_000, "M"), (1_000, "K")];

    for (unit, suffix) in UNITS {
        if n >= unit {
            // Round down so 999_999 never shows as "1000K"
            let tenths = n / (unit / 10);
            let (whole, frac) = (tenths / 10, tenths % 10);
            return if frac == 0 {
                format!("{}{}", whole, suffix)
            } else {
                format!("{}.{}{}", whole, frac, suffix)
            };
        }
    }
    n.to_string()
}

fn upload_date(unix_seconds: i64) -> Option<String> {
    let date = OffsetDateTime::from_unix_timestamp(unix_seconds).ok()?.date();
    date.format(format_description!("[year]-[month]-[day]")).ok()
}

fn truncate(caption: String, max_units: usize) -> String {
    if caption.encode_utf16().count() <= max_units {
        return caption;
    }

    // Cut on a char boundary, leaving one unit for the ellipsis
    let mut units = 0;
    let mut cut = String::new();
    for ch in caption.chars() {
        units += ch.len_utf16();
        if units > max_units - 1 {
            break;
        }
        cut.push(ch);
    }
    cut.push('…');
    cut
}
