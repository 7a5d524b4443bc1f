use crate::artifacts::records::raw_record::RawRecord;
use chrono::FixedOffset;

/// Connection and server details reported by `info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRecord {
    pub user_name: String,
    pub client_name: String,
    pub client_root: String,
    pub client_host: String,
    pub client_cwd: String,
    pub client_stream: String,
    pub client_address: String,
    pub server_address: String,
    pub server_root: String,
    pub server_version: String,
    pub server_uptime: String,
    pub server_license: String,
    pub server_id: String,
    pub case_handling: String,
    /// Offset of the server clock from UTC, taken from `serverDate`
    pub server_utc_offset: Option<FixedOffset>,
}

impl InfoRecord {
    /// Whether the server was set up with a client workspace the user can use
    pub fn has_client(&self) -> bool {
        !self.client_name.is_empty() && self.client_name != "*unknown*"
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_handling == "sensitive"
    }
}

/// Extract the UTC offset from a date such as `2021/01/02 03:04:05 -0800 PST`
///
/// Only the first three whitespace tokens are considered; the trailing zone
/// name is ambiguous and ignored.
pub fn parse_utc_offset(server_date: &str) -> Option<FixedOffset> {
    let tokens = server_date.split_whitespace().take(3).collect::<Vec<_>>();
    let [_, _, offset] = tokens.as_slice() else {
        return None;
    };

    let (sign, digits) = match offset.split_at_checked(1)? {
        ("+", digits) => (1, digits),
        ("-", digits) => (-1, digits),
        _ => return None,
    };
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let hours = digits[..2].parse::<i32>().ok()?;
    let minutes = digits[2..].parse::<i32>().ok()?;

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl From<&RawRecord> for InfoRecord {
    fn from(record: &RawRecord) -> Self {
        let server_date = record.text("serverDate");
        let server_utc_offset = parse_utc_offset(&server_date);
        if server_utc_offset.is_none() && !server_date.is_empty() {
            tracing::warn!(server_date, "unrecognized server date");
        }

        let info = InfoRecord {
            user_name: record.text("userName"),
            client_name: record.text("clientName"),
            client_root: record.text("clientRoot"),
            client_host: record.text("clientHost"),
            client_cwd: record.text("clientCwd"),
            client_stream: record.text("clientStream"),
            client_address: record.text("clientAddress"),
            server_address: record.text("serverAddress"),
            server_root: record.text("serverRoot"),
            server_version: record.text("serverVersion"),
            server_uptime: record.text("serverUptime"),
            server_license: record.text("serverLicense"),
            server_id: record.text("serverID"),
            case_handling: record.text("caseHandling"),
            server_utc_offset,
        };
        tracing::trace!(?info, "info record");
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("2021/01/02 03:04:05 -0800 PST", Some(-8 * 3600))]
    #[case("2021/01/02 03:04:05 +0530 IST", Some(5 * 3600 + 30 * 60))]
    #[case("2021/01/02 03:04:05 +0000", Some(0))]
    #[case("2021/01/02 03:04:05", None)]
    #[case("2021/01/02 03:04:05 PST -0800", None)]
    #[case("", None)]
    fn parses_offset(#[case] server_date: &str, #[case] seconds: Option<i32>) {
        assert_eq!(
            parse_utc_offset(server_date).map(|offset| offset.local_minus_utc()),
            seconds
        );
    }

    #[test]
    fn maps_info_fields() {
        let record: RawRecord = [
            ("userName", "bob"),
            ("clientName", "bob-ws"),
            ("clientRoot", "/home/bob/ws"),
            ("serverAddress", "perforce:1666"),
            ("serverDate", "2021/01/02 03:04:05 -0800 PST"),
            ("serverVersion", "P4D/LINUX26X86_64/2021.1/2156517 (2021/05/19)"),
            ("caseHandling", "sensitive"),
        ]
        .into_iter()
        .collect();

        let info = InfoRecord::from(&record);

        assert_eq!(info.user_name, "bob");
        assert_eq!(info.server_address, "perforce:1666");
        assert_eq!(info.server_utc_offset, FixedOffset::west_opt(8 * 3600));
        assert!(info.has_client());
        assert!(info.is_case_sensitive());
        assert_eq!(info.client_stream, "");
    }

    #[test]
    fn unknown_client_is_not_a_client() {
        let record: RawRecord = [("clientName", "*unknown*")].into_iter().collect();

        assert!(!InfoRecord::from(&record).has_client());
    }
}
