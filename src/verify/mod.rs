//! 邮箱验证码
//!
//! 生成、限频、存储与校验六位数字验证码

pub mod generator;
pub mod issuer;
pub mod kind;

pub use generator::{CODE_MAX, CODE_MIN, CodeGenerator, RandomCodeGenerator, SequenceCodeGenerator};
pub use issuer::{CodeDelivery, OneTimeCodeIssuer};
pub use kind::CodeKind;
