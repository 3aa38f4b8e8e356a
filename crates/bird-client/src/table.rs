//! Folding of `show protocols all` replies into a [`ProtocolTable`].
//!
//! The reply interleaves three kinds of lines:
//!
//! | Code | Line | Effect |
//! |------|------|--------|
//! | `2xxx` | table heading | defines the columns of the following rows |
//! | `1002` | protocol list row | starts a new record and makes it current |
//! | `1006` | protocol detail | adds a field to the current record |
//!
//! Every other code, including the terminal line, is ignored.

use bird_types::{FieldValue, ProtocolRecord, ProtocolTable, ReplyLine};

use crate::detail::{parse_detail, DetailMatch};
use crate::error::{BirdError, BirdResult};

/// Column that keys the resulting table.
pub const NAME_COLUMN: &str = "name";

#[derive(Debug, Clone, PartialEq, Eq)]
enum BuilderState {
    /// No heading seen yet.
    AwaitingHeading,
    /// Heading seen, no row since.
    HaveColumns(Vec<String>),
    /// Detail lines apply to the protocol `name`.
    InProtocol { columns: Vec<String>, name: String },
}

/// State machine building a protocol table line by line.
#[derive(Debug)]
pub struct ProtocolTableBuilder {
    state: BuilderState,
    protocols: ProtocolTable,
}

impl Default for ProtocolTableBuilder {
    fn default() -> Self {
        Self {
            state: BuilderState::AwaitingHeading,
            protocols: ProtocolTable::new(),
        }
    }
}

impl ProtocolTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from a complete, ordered reply.
    pub fn build<'a, I>(lines: I) -> BirdResult<ProtocolTable>
    where
        I: IntoIterator<Item = &'a ReplyLine>,
    {
        let mut builder = Self::new();
        for line in lines {
            builder.push(line)?;
        }
        Ok(builder.finish())
    }

    /// Feeds one decoded line.
    pub fn push(&mut self, line: &ReplyLine) -> BirdResult<()> {
        if line.code.is_table_heading() {
            self.state = BuilderState::HaveColumns(parse_heading(&line.payload));
        } else if line.code.is_protocol_list() {
            self.push_row(&line.payload)?;
        } else if line.code.is_protocol_detail() {
            self.push_detail(&line.payload)?;
        }
        Ok(())
    }

    /// Returns the accumulated table.
    pub fn finish(self) -> ProtocolTable {
        self.protocols
    }

    fn push_row(&mut self, payload: &str) -> BirdResult<()> {
        let columns = match std::mem::replace(&mut self.state, BuilderState::AwaitingHeading) {
            BuilderState::AwaitingHeading => {
                return Err(BirdError::sequence(
                    "protocol list entry received before any table heading",
                ));
            }
            BuilderState::HaveColumns(columns) | BuilderState::InProtocol { columns, .. } => {
                columns
            }
        };

        let record = zip_row(&columns, payload);
        let name = match record.name() {
            Some(name) => name.to_string(),
            None => {
                self.state = BuilderState::HaveColumns(columns);
                return Err(BirdError::sequence(format!(
                    "protocol list entry without a {} column: {:?}",
                    NAME_COLUMN, payload
                )));
            }
        };

        self.protocols.insert(name.clone(), record);
        self.state = BuilderState::InProtocol { columns, name };
        Ok(())
    }

    fn push_detail(&mut self, payload: &str) -> BirdResult<()> {
        let BuilderState::InProtocol { name, .. } = &self.state else {
            return Err(BirdError::sequence(
                "protocol detail received before any protocol list entry",
            ));
        };

        if let DetailMatch::Field { name: field, value } = parse_detail(payload) {
            if let Some(record) = self.protocols.get_mut(name) {
                record.merge(field, value);
            }
        }
        Ok(())
    }
}

/// Splits a heading into lower-cased column names.
fn parse_heading(payload: &str) -> Vec<String> {
    payload
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// Pairs row tokens with column names position by position. Surplus tokens
/// are dropped; missing tokens leave their columns unset.
fn zip_row(columns: &[String], payload: &str) -> ProtocolRecord {
    columns
        .iter()
        .zip(payload.split_whitespace())
        .map(|(column, token)| (column.clone(), FieldValue::from(token)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bird_types::ReplyCode;
    use pretty_assertions::assert_eq;

    fn line(code: &str, payload: &str) -> ReplyLine {
        ReplyLine::new(code.parse::<ReplyCode>().unwrap(), true, payload)
    }

    fn heading() -> ReplyLine {
        line("2002", "name proto table state since info")
    }

    #[test]
    fn test_row_zipped_with_heading() {
        let lines = [heading(), line("1002", "bgp1 BGP master up 10:00 Established")];
        let table = ProtocolTableBuilder::build(&lines).unwrap();

        let expected: ProtocolRecord = [
            ("name", "bgp1"),
            ("proto", "BGP"),
            ("table", "master"),
            ("state", "up"),
            ("since", "10:00"),
            ("info", "Established"),
        ]
        .into_iter()
        .map(|(k, v)| (k, FieldValue::from(v)))
        .collect();

        assert_eq!(table.len(), 1);
        assert_eq!(table["bgp1"], expected);
    }

    #[test]
    fn test_heading_columns_are_lowercased() {
        let lines = [
            line("2002", "Name       Proto      Table      State  Since         Info"),
            line("1002", "device1    Device     ---        up     2024-01-01"),
        ];
        let table = ProtocolTableBuilder::build(&lines).unwrap();
        let record = &table["device1"];
        assert_eq!(record.text("proto"), Some("Device"));
        assert_eq!(record.text("since"), Some("2024-01-01"));
        assert!(!record.contains("info"));
    }

    #[test]
    fn test_surplus_tokens_dropped() {
        let lines = [
            heading(),
            line("1002", "bgp2 BGP master start 10:00 Connect Socket: Connection refused"),
            line("1002", "bgp3 BGP master up 2024-01-01 10:00:00 Established"),
        ];
        let table = ProtocolTableBuilder::build(&lines).unwrap();
        assert_eq!(table["bgp2"].len(), 6);
        assert_eq!(table["bgp2"].text("info"), Some("Connect"));
        assert_eq!(table["bgp3"].text("since"), Some("2024-01-01"));
        assert_eq!(table["bgp3"].text("info"), Some("10:00:00"));
    }

    #[test]
    fn test_details_enrich_current_protocol() {
        let lines = [
            heading(),
            line("1002", "bgp1 BGP master up 10:00 Established"),
            line("1006", "  Preference:     100"),
            line("1006", "  Description:    ignored"),
            line("1006", "    BGP state:          Established"),
            line("1002", "bgp2 BGP master start 10:00 Active"),
            line("1006", "    BGP state:          Active"),
            line("0000", ""),
        ];
        let table = ProtocolTableBuilder::build(&lines).unwrap();

        assert_eq!(table["bgp1"].count("preference"), Some(100));
        assert_eq!(table["bgp1"].text("bgp_state"), Some("established"));
        assert!(!table["bgp1"].contains("description"));
        assert_eq!(table["bgp2"].text("bgp_state"), Some("active"));
        assert!(!table["bgp2"].contains("preference"));
    }

    #[test]
    fn test_route_change_stats_accumulate() {
        let lines = [
            heading(),
            line("1002", "bgp1 BGP master up 10:00 Established"),
            line("1006", "    Import updates:              3          0          0          0          3"),
            line("1006", "    Export withdraws:            1        ---        ---        ---          1"),
        ];
        let table = ProtocolTableBuilder::build(&lines).unwrap();

        let stats = table["bgp1"]
            .get("route_change_stats")
            .and_then(FieldValue::as_map)
            .unwrap();
        assert!(stats.contains_key("import_updates"));
        assert!(stats.contains_key("export_withdraws"));
    }

    #[test]
    fn test_row_before_heading() {
        let lines = [line("1002", "bgp1 BGP master up 10:00 Established")];
        let err = ProtocolTableBuilder::build(&lines).unwrap_err();
        assert!(matches!(err, BirdError::Sequence { .. }));
        assert!(err.is_protocol_error());
    }

    #[test]
    fn test_detail_before_row() {
        let lines = [heading(), line("1006", "  Preference:     100")];
        let err = ProtocolTableBuilder::build(&lines).unwrap_err();
        assert!(matches!(err, BirdError::Sequence { .. }));
    }

    #[test]
    fn test_heading_resets_current_protocol() {
        let lines = [
            heading(),
            line("1002", "bgp1 BGP master up 10:00 Established"),
            heading(),
            line("1006", "  Preference:     100"),
        ];
        assert!(ProtocolTableBuilder::build(&lines).is_err());
    }

    #[test]
    fn test_row_without_name_column() {
        let lines = [
            line("2002", "proto table state"),
            line("1002", "BGP master up"),
        ];
        let err = ProtocolTableBuilder::build(&lines).unwrap_err();
        assert!(err.to_string().contains("without a name column"));
    }

    #[test]
    fn test_other_codes_ignored() {
        let lines = [
            line("0001", "BIRD 2.0.8 ready."),
            line("1000", "BIRD 2.0.8"),
            line("0000", ""),
        ];
        assert!(ProtocolTableBuilder::build(&lines).unwrap().is_empty());
    }
}
