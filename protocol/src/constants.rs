//! 游戏常量定义

/// 合法除数（按此顺序生成走法）
pub const DIVISORS: [u32; 3] = [2, 3, 4];

/// 终局阈值：当前数字小于等于此值时游戏结束
pub const TERMINAL_THRESHOLD: u32 = 10;

/// 银行计数：新数字是此值的倍数时银行加一
pub const BANK_MULTIPLE: u32 = 5;

/// 推荐起始数字下限
pub const MIN_STARTING_NUMBER: u32 = 20000;

/// 推荐起始数字上限
pub const MAX_STARTING_NUMBER: u32 = 30000;

/// 推荐起始数字需被 2、3、4 同时整除（2*3*4 的最小公倍数为 12）
pub const STARTING_NUMBER_FACTOR: u32 = 12;

/// 判断是否为推荐的起始数字
pub fn is_recommended_start(number: u32) -> bool {
    (MIN_STARTING_NUMBER..=MAX_STARTING_NUMBER).contains(&number)
        && number % STARTING_NUMBER_FACTOR == 0
}
