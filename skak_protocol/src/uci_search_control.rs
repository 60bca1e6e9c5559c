use std::fmt::Display;

use skak_core::uci_move::LongAlgebraicMove;

use crate::format_utils::SpaceSepFormatter;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UCISearchControl {
    pub search_moves: Vec<LongAlgebraicMove>,
    pub mate: Option<u32>,
    pub depth: Option<u32>,
    pub nodes: Option<u64>,
}

impl UCISearchControl {
    /// Builds a search control from raw parsed `go` fields, or `None` if none
    /// of them were actually present (a bare `go` carries no search control).
    pub(crate) fn from_raw(
        search_moves: Vec<LongAlgebraicMove>,
        mate: Option<u32>,
        depth: Option<u32>,
        nodes: Option<u64>,
    ) -> Option<Self> {
        if search_moves.is_empty() && mate.is_none() && depth.is_none() && nodes.is_none() {
            None
        } else {
            Some(Self {
                search_moves,
                mate,
                depth,
                nodes,
            })
        }
    }
}

impl Display for UCISearchControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut formatter = SpaceSepFormatter::new(f);

        if !self.search_moves.is_empty() {
            formatter.push_str("searchmoves")?;

            for m in self.search_moves.iter() {
                formatter.push(m)?;
            }
        }

        formatter.push_option("mate", self.mate)?;
        formatter.push_option("depth", self.depth)?;
        formatter.push_option("nodes", self.nodes)?;

        Ok(())
    }
}
