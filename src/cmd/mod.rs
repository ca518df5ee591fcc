//! CLI command implementations.
//!
//! | Module      | Commands handled      |
//! |-------------|-----------------------|
//! | `serve`     | `Serve`               |
//! | `init`      | `Init`                |
//! | `org`       | `Org`                 |
//! | `statuses`  | `Statuses`            |
//! | `config`    | `Config`              |

pub mod config;
pub mod init;
pub mod org;
pub mod serve;
pub mod statuses;

pub use config::cmd_config;
pub use init::cmd_init;
pub use org::cmd_org;
pub use serve::cmd_serve;
pub use statuses::cmd_statuses;
