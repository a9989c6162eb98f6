pub mod output;
pub mod rich_text;
pub mod tree;

pub use output::{OutputBlock, OutputTableRow};
pub use rich_text::{RunStyle, TextRun};
pub use tree::{BlockNode, Document, List, ListItem, TableRow};
