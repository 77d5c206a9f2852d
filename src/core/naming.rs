use crate::types::Resolution;

const DEFAULT_EXTENSION: &str = "png";

/// Download name for an enhanced image:
/// `{base}-enhanced-{label}.{ext}`, where `ext` is the text after the last
/// dot of the original name (`png` when there is none).
pub fn download_file_name(original_name: &str, resolution: Resolution) -> String {
    let (base, extension) = match original_name.rsplit_once('.') {
        Some((base, ext)) => (base, ext),
        None => (original_name, DEFAULT_EXTENSION),
    };
    format!("{base}-enhanced-{resolution}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_original_extension() {
        assert_eq!(
            download_file_name("cat.jpg", Resolution::P1080),
            "cat-enhanced-1080p.jpg"
        );
    }

    #[test]
    fn only_the_last_dot_splits() {
        assert_eq!(
            download_file_name("my.cat.photo.webp", Resolution::P720),
            "my.cat.photo-enhanced-720p.webp"
        );
    }

    #[test]
    fn defaults_to_png_without_extension() {
        assert_eq!(
            download_file_name("scan", Resolution::P144),
            "scan-enhanced-144p.png"
        );
    }

    #[test]
    fn every_tier_label_lands_in_the_name() {
        for tier in Resolution::ALL {
            let name = download_file_name("dog.png", tier);
            assert!(name.contains(tier.label()), "{name}");
            assert!(name.ends_with(".png"));
        }
    }
}
