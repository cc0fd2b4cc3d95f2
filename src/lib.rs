#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use yc_config as config;
pub use yc_doc as doc;
pub use yc_reflect as reflect;
pub use yc_utils as utils;

pub use yc_config::{Config, ConfigError};
pub use yc_reflect::Reflect;
