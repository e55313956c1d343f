//! Board catalogue
//!
//! Every EEG device the launcher knows about, in the order the intro menu
//! lists them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::CatalogError;

/// Suffix appended to an OpenBCI board code when it streams through the WiFi shield.
pub const WIFI_SUFFIX: &str = "_wifi";

/// Types of supported EEG boards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardKind {
    /// No device; the experiment runs without recording
    None,
    Muse,
    Ganglion,
    Cyton,
    CytonDaisy,
    Unicorn,
    #[serde(rename = "brainbit")]
    BrainBit,
    /// Software-generated signal for dry runs
    Synthetic,
}

impl BoardKind {
    /// All boards in menu order.
    pub const ALL: [BoardKind; 8] = [
        BoardKind::None,
        BoardKind::Muse,
        BoardKind::Ganglion,
        BoardKind::Cyton,
        BoardKind::CytonDaisy,
        BoardKind::Unicorn,
        BoardKind::BrainBit,
        BoardKind::Synthetic,
    ];

    /// Look up a board by its menu index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human readable name shown in the menu.
    pub fn display_name(&self) -> &'static str {
        match self {
            BoardKind::None => "None",
            BoardKind::Muse => "Muse",
            BoardKind::Ganglion => "OpenBCI Ganglion",
            BoardKind::Cyton => "OpenBCI Cyton",
            BoardKind::CytonDaisy => "OpenBCI Cyton + Daisy",
            BoardKind::Unicorn => "G.Tec Unicorn",
            BoardKind::BrainBit => "BrainBit",
            BoardKind::Synthetic => "Synthetic",
        }
    }

    /// Short code used in file names and on the command line.
    pub fn code(&self) -> &'static str {
        match self {
            BoardKind::None => "none",
            BoardKind::Muse => "muse",
            BoardKind::Ganglion => "ganglion",
            BoardKind::Cyton => "cyton",
            BoardKind::CytonDaisy => "cyton_daisy",
            BoardKind::Unicorn => "unicorn",
            BoardKind::BrainBit => "brainbit",
            BoardKind::Synthetic => "synthetic",
        }
    }

    /// OpenBCI boards can be reached either over the USB dongle or the WiFi shield.
    pub fn is_openbci(&self) -> bool {
        matches!(
            self,
            BoardKind::Cyton | BoardKind::CytonDaisy | BoardKind::Ganglion
        )
    }

    /// Nominal sample rate in Hz. Zero for `None`.
    pub fn sample_rate(&self) -> u32 {
        match self {
            BoardKind::None => 0,
            BoardKind::Muse => 256,
            BoardKind::Ganglion => 200,
            BoardKind::Cyton => 250,
            BoardKind::CytonDaisy => 125,
            BoardKind::Unicorn => 250,
            BoardKind::BrainBit => 250,
            BoardKind::Synthetic => 256,
        }
    }
}

impl fmt::Display for BoardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BoardKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|board| board.code() == code)
            .ok_or_else(|| CatalogError::UnknownBoard(code.to_string()))
    }
}

/// How an OpenBCI board talks to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionMethod {
    #[default]
    UsbDongle,
    WifiShield,
}

impl ConnectionMethod {
    pub const ALL: [ConnectionMethod; 2] = [ConnectionMethod::UsbDongle, ConnectionMethod::WifiShield];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectionMethod::UsbDongle => "usb dongle",
            ConnectionMethod::WifiShield => "wifi shield",
        }
    }
}

/// A board together with the way it is connected.
///
/// The connection only matters for OpenBCI boards; for everything else it is
/// ignored when building the board code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSelection {
    pub kind: BoardKind,
    pub connection: ConnectionMethod,
}

impl BoardSelection {
    pub fn new(kind: BoardKind) -> Self {
        Self {
            kind,
            connection: ConnectionMethod::UsbDongle,
        }
    }

    pub fn with_connection(kind: BoardKind, connection: ConnectionMethod) -> Self {
        Self { kind, connection }
    }

    /// True when the board streams through the OpenBCI WiFi shield.
    pub fn uses_wifi(&self) -> bool {
        self.kind.is_openbci() && self.connection == ConnectionMethod::WifiShield
    }

    /// Board code as it appears in file names, e.g. `cyton_wifi`.
    pub fn code(&self) -> String {
        if self.uses_wifi() {
            format!("{}{}", self.kind.code(), WIFI_SUFFIX)
        } else {
            self.kind.code().to_string()
        }
    }
}

impl From<BoardKind> for BoardSelection {
    fn from(kind: BoardKind) -> Self {
        BoardSelection::new(kind)
    }
}

impl fmt::Display for BoardSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

impl FromStr for BoardSelection {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if let Some(base) = code.strip_suffix(WIFI_SUFFIX) {
            let kind: BoardKind = base.parse()?;
            if !kind.is_openbci() {
                return Err(CatalogError::UnknownBoard(code.to_string()));
            }
            return Ok(BoardSelection::with_connection(kind, ConnectionMethod::WifiShield));
        }
        Ok(BoardSelection::new(code.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_order_matches_codes() {
        let codes: Vec<&str> = BoardKind::ALL.iter().map(|b| b.code()).collect();
        assert_eq!(
            codes,
            vec!["none", "muse", "ganglion", "cyton", "cyton_daisy", "unicorn", "brainbit", "synthetic"]
        );
        assert_eq!(BoardKind::from_index(4), Some(BoardKind::CytonDaisy));
        assert_eq!(BoardKind::from_index(8), None);
    }

    #[test]
    fn test_only_openbci_boards_take_wifi_suffix() {
        let cyton = BoardSelection::with_connection(BoardKind::Cyton, ConnectionMethod::WifiShield);
        assert_eq!(cyton.code(), "cyton_wifi");

        let muse = BoardSelection::with_connection(BoardKind::Muse, ConnectionMethod::WifiShield);
        assert_eq!(muse.code(), "muse");

        let ganglion = BoardSelection::new(BoardKind::Ganglion);
        assert_eq!(ganglion.code(), "ganglion");
    }

    #[test]
    fn test_parse_board_selection() {
        let daisy: BoardSelection = "cyton_daisy_wifi".parse().unwrap();
        assert_eq!(daisy.kind, BoardKind::CytonDaisy);
        assert!(daisy.uses_wifi());

        let synthetic: BoardSelection = " synthetic ".parse().unwrap();
        assert_eq!(synthetic, BoardSelection::new(BoardKind::Synthetic));

        assert!("muse_wifi".parse::<BoardSelection>().is_err());
        assert!("openbci".parse::<BoardSelection>().is_err());
    }

    #[test]
    fn test_nominal_sample_rates() {
        assert_eq!(BoardKind::Synthetic.sample_rate(), 256);
        assert_eq!(BoardKind::CytonDaisy.sample_rate(), 125);
        assert_eq!(BoardKind::None.sample_rate(), 0);
    }
}
