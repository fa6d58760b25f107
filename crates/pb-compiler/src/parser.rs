/// Lines starting with this prefix point at an internal address and are noise.
const PRIVATE_NOISE_PREFIX: &str = "10.10";

/// Section marker used by ad-block style host files.
const ADBLOCK_HEADER: &str = "[AdBlock]";

/// Parse an ad-block style host file into sorted entries.
///
/// Blank lines, `#` comments, `[AdBlock]` headers and lines under the
/// `10.10` prefix are discarded. Survivors are trimmed and sorted.
pub fn parse_adblock_hosts(text: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || is_noise_line(line) {
            skipped += 1;
            continue;
        }
        entries.push(line.to_string());
    }

    entries.sort();
    log::debug!("adblock hosts: {} entries, {} lines skipped", entries.len(), skipped);

    entries
}

fn is_noise_line(line: &str) -> bool {
    line.starts_with('#') || line.starts_with(ADBLOCK_HEADER) || line.starts_with(PRIVATE_NOISE_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_domain_entries() {
        let text = "# comment\n\n[AdBlock]\n10.10.1.1 blocked.local\ntracker.example\n";
        assert_eq!(parse_adblock_hosts(text), vec!["tracker.example".to_string()]);
    }

    #[test]
    fn trims_and_sorts_entries() {
        let text = "  zeta.example \r\nalpha.example\n\t\nmid.example";
        assert_eq!(
            parse_adblock_hosts(text),
            vec!["alpha.example".to_string(), "mid.example".to_string(), "zeta.example".to_string()]
        );
    }

    #[test]
    fn noise_prefix_is_literal() {
        // Only the literal 10.10 prefix is noise, not every private range.
        let text = "10.1.1.1 a.example\n192.168.1.1 b.example\n10.100.0.1 c.example";
        assert_eq!(
            parse_adblock_hosts(text),
            vec!["10.1.1.1 a.example".to_string(), "192.168.1.1 b.example".to_string()]
        );
    }

    #[test]
    fn empty_input() {
        assert!(parse_adblock_hosts("").is_empty());
        assert!(parse_adblock_hosts("# only\n[AdBlock]\n").is_empty());
    }
}
