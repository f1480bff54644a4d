//! stackgen core
//!
//! 1つのサービスインベントリ（YAML）を読み込み、検証・正規化したうえで
//! 複数のデプロイ成果物へ投影します。
//!
//! ```text
//! custom.yml ──▶ loader ──▶ normalize ──▶ render ──▶ writer
//!                              │            ├─ docker-compose.yml
//!                              │            ├─ docker-compose.dev.yml
//!                              ▼            ├─ Caddyfile
//!                         Diagnostic        ├─ homepage_services.yaml
//!                                           └─ proxy.docker-compose.yml
//! ```

pub mod error;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod render;
pub mod settings;
pub mod writer;

pub use error::*;
pub use loader::*;
pub use model::*;
pub use normalize::*;
pub use render::*;
pub use settings::*;
pub use writer::*;
