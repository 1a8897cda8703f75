//! defikit - Cached DeFi tooling for Solana agents
//!
//! Two independent components:
//!
//! - A result-caching async toolkit wrapping a Solana RPC client and public
//!   token-data services (balance, price, trending tokens, safety reports,
//!   TPS, token metadata), with a uniform result envelope and a bounded
//!   operation history.
//! - An Anchor IDL downgrade converter from the 0.30+ format to the legacy
//!   (pre-0.29) format, exposed via the `convert-idl` binary.
//!
//! # Toolkit Quick Start
//!
//! ```ignore
//! use defikit::{Config, DeFiToolkit};
//!
//! let mut toolkit = DeFiToolkit::new(Config::load()?);
//! if toolkit.initialize().await {
//!     let balance = toolkit.get_balance(None).await;
//!     println!("success={} data={}", balance.success, balance.data);
//! }
//! ```
//!
//! # IDL Conversion
//!
//! ```ignore
//! use defikit::idl::{convert_idl, load_idl_from_file, write_legacy_idl};
//!
//! let idl = load_idl_from_file("./target/idl/my_program.json".as_ref())?;
//! let legacy = convert_idl(idl);
//! write_legacy_idl("./idl/my_program_legacy.json".as_ref(), &legacy)?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod idl;
pub mod toolkit;

// Public re-exports for library users
pub use config::{Config, ToolCapabilities};
pub use error::{DefikitError, DefikitResult};
pub use idl::{
    // Conversion
    convert_idl,
    load_idl_from_file,
    to_camel_case,
    write_legacy_idl,
    // Types
    Idl,
    IdlInstruction,
    IdlType,
    IdlTypeDef,
    LegacyIdl,
    LegacyInstruction,
    LegacyTypeDef,
};
pub use toolkit::{
    AgentClient, CapabilityReport, DeFiToolkit, OperationRecord, SolanaAgentClient, ToolResult,
    ToolkitStats,
};
