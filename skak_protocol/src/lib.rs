mod format_utils;
mod parsing;
mod uci_info;
mod uci_message;
mod uci_opponent;
mod uci_option_config;
mod uci_position;
mod uci_search_control;
mod uci_time_control;

pub use parsing::parse_message;
pub use uci_info::{UCIInfo, UCIInfoCurrLine, UCIInfoScore};
pub use uci_message::{ProtectionState, UCIMessage};
pub use uci_opponent::UCIOpponent;
pub use uci_option_config::UCIOptionConfig;
pub use uci_position::{UCIPosition, UCIPositionBase};
pub use uci_search_control::UCISearchControl;
pub use uci_time_control::UCITimeControl;
