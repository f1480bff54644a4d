//! モデル定義
//!
//! インベントリ（入力）と正規化済みサービス（投影の入力）を定義します。

mod inventory;
mod key;
mod normalized;
mod service;
mod storage;

// Re-exports
pub use inventory::*;
pub use key::*;
pub use normalized::*;
pub use service::*;
pub use storage::*;

pub(crate) use key::key_name;
