//! CLI value enums and domain type conversions.

use clap::ValueEnum;

use crate::export::SnapshotFormat;

/// Snapshot format for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormatArg {
    /// SVG image
    Svg,
    /// JSON document
    Json,
    /// Graphviz DOT source
    Dot,
}

impl std::fmt::Display for SnapshotFormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(SnapshotFormat::from(*self).as_str())
    }
}

impl From<SnapshotFormatArg> for SnapshotFormat {
    fn from(arg: SnapshotFormatArg) -> Self {
        match arg {
            SnapshotFormatArg::Svg => SnapshotFormat::Svg,
            SnapshotFormatArg::Json => SnapshotFormat::Json,
            SnapshotFormatArg::Dot => SnapshotFormat::Dot,
        }
    }
}
