use std::sync::Mutex;

use rand::Rng;

/// 验证码取值范围，始终为六位数
pub const CODE_MIN: u32 = 100_000;
pub const CODE_MAX: u32 = 999_999;

/// 验证码生成器
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> u32;
}

/// 使用线程本地随机数生成均匀分布的六位验证码
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> u32 {
        rand::thread_rng().gen_range(CODE_MIN..=CODE_MAX)
    }
}

/// 按固定序列返回验证码，用尽后重复最后一个（测试用）
#[derive(Debug)]
pub struct SequenceCodeGenerator {
    codes: Mutex<Vec<u32>>,
}

impl SequenceCodeGenerator {
    pub fn new(codes: impl IntoIterator<Item = u32>) -> Self {
        let mut codes: Vec<u32> = codes.into_iter().collect();
        codes.reverse();
        Self {
            codes: Mutex::new(codes),
        }
    }
}

impl CodeGenerator for SequenceCodeGenerator {
    fn generate(&self) -> u32 {
        let mut codes = self.codes.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match codes.len() {
            0 => CODE_MIN,
            1 => codes[0],
            _ => codes.pop().unwrap_or(CODE_MIN),
        }
    }
}
