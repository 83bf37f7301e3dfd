use super::code_conversions;
use num_derive::FromPrimitive;

#[repr(u32)]
#[derive(PartialEq, Eq, Hash, Clone, Copy, FromPrimitive, Debug)]
pub enum StudyType {
    // Drawn over the price pane.
    MovingAverage = 0x1,
    BollingerBands = 0x2,
    Envelope = 0x3,
    DonchianChannel = 0x4,
    OverlayExpression = 0x5,
    KeltnerChannel = 0x8,
    FloatTurnoverChannel = 0x9,
    VolumeAtPrice = 0xA,
    Autowave = 0xB,
    WeeklyPivot = 0xF,
    DailyPivot = 0x11,
    ParabolicSar = 0x12,

    // Drawn in a pane of their own.
    Volume = 0x1F5,
    OpenInterest = 0x1F6,
    Stochastic = 0x1F7,
    Macd = 0x1F8,
    Rsi = 0x1F9,
    Momentum = 0x1FA,
    Roc = 0x1FB,
    OnBalanceVolume = 0x1FC,
    DirectionalIndicator = 0x1FD,
    Choppiness = 0x1FE,
    MoneyFlowIndex = 0x1FF,
    WilliamsPctR = 0x201,
    StochRsi = 0x202,
    AverageTrueRange = 0x203,
    AccumulationDistribution = 0x205,
    CommodityChannelIndex = 0x206,
    PercentPriceOscillator = 0x207,
}

code_conversions!(StudyType, u32, from_u32, "study type");

impl StudyType {
    pub fn is_upper_study(self) -> bool {
        (self as u32) < (Self::Volume as u32)
    }
}
