//! Splitting a block sequence into transport-sized batches.

use notebridge_engine::{OutputBlock, convert_markdown};

/// The workspace API accepts at most this many blocks per call.
pub const MAX_BLOCKS_PER_REQUEST: usize = 100;

/// An ordered partition of a block sequence: the initial creation batch
/// plus follow-up append batches.
///
/// Concatenating `initial` and every append batch in order reproduces the
/// input sequence exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockBatches {
    initial: Vec<OutputBlock>,
    appends: Vec<Vec<OutputBlock>>,
}

impl BlockBatches {
    /// Convert markdown and slice the result for transport in one step.
    pub fn from_markdown(markdown: &str) -> Self {
        Self::split(convert_markdown(markdown))
    }

    pub fn split(blocks: Vec<OutputBlock>) -> Self {
        let mut initial = blocks;
        let appends = if initial.len() > MAX_BLOCKS_PER_REQUEST {
            let rest = initial.split_off(MAX_BLOCKS_PER_REQUEST);
            rest.chunks(MAX_BLOCKS_PER_REQUEST)
                .map(<[OutputBlock]>::to_vec)
                .collect()
        } else {
            Vec::new()
        };
        Self { initial, appends }
    }

    /// Blocks for the create call.
    pub fn initial(&self) -> &[OutputBlock] {
        &self.initial
    }

    /// Batches for the append calls, in submission order.
    pub fn appends(&self) -> &[Vec<OutputBlock>] {
        &self.appends
    }

    pub fn total_blocks(&self) -> usize {
        self.initial.len() + self.appends.iter().map(Vec::len).sum::<usize>()
    }
}
