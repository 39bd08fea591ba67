#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod config;
pub use config::StoreConfig;

mod criteria;
pub use criteria::{SearchCriteria, MAX_RESULTS};

mod memory;
pub use memory::MemoryUserSource;

mod source;
pub use source::{SourceError, UserSource};

mod store;
pub use store::UserStore;

mod user;
pub use user::User;
