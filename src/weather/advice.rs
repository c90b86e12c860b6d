//! Watering advice derived from a forecast.

use std::fmt;

const DEFAULT_RAIN_PROB: i32 = 0;
const DEFAULT_MAX_TEMP: i32 = 25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WateringAdvice {
    HeavyRain,
    ChanceOfRain,
    Hot,
    Cold,
    Normal,
}

impl WateringAdvice {
    pub fn message(&self) -> &'static str {
        match self {
            WateringAdvice::HeavyRain => "今天會下雨，戶外植物不用澆水，室內等土乾再澆",
            WateringAdvice::ChanceOfRain => "有下雨機會，室內植物今天先不用澆",
            WateringAdvice::Hot => "天氣炎熱，可以幫植物補水，但等土乾再澆",
            WateringAdvice::Cold => "天氣偏冷，植物進入休眠期，減少澆水",
            WateringAdvice::Normal => "天氣不錯，正常澆水就好",
        }
    }
}

impl fmt::Display for WateringAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// First matching rule wins; rain is checked before temperature.
pub fn advice(rain_prob: Option<i32>, max_temp: Option<i32>) -> WateringAdvice {
    let rain_prob = rain_prob.unwrap_or(DEFAULT_RAIN_PROB);
    let max_temp = max_temp.unwrap_or(DEFAULT_MAX_TEMP);

    if rain_prob >= 70 {
        WateringAdvice::HeavyRain
    } else if rain_prob >= 40 {
        WateringAdvice::ChanceOfRain
    } else if max_temp >= 30 {
        WateringAdvice::Hot
    } else if max_temp <= 15 {
        WateringAdvice::Cold
    } else {
        WateringAdvice::Normal
    }
}
