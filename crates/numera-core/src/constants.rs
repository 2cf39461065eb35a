/// Master numbers, retained instead of reduced under preserve semantics.
pub const MASTER_NUMBERS: [u32; 3] = [11, 22, 33];

/// Karmic debt numbers, significant when they appear along a reduction trace.
pub const KARMIC_DEBT_NUMBERS: [u32; 4] = [13, 14, 16, 19];

/// First pinnacle ends at this age minus the life path number.
pub const FIRST_PINNACLE_BASE_AGE: u32 = 36;

/// Length of the second and third pinnacle cycles, in years.
pub const PINNACLE_CYCLE_LENGTH: u32 = 9;

/// Challenge cycles share the pinnacle timing.
pub const CHALLENGE_CYCLE_LENGTH: u32 = 9;

/// First life period ends at this age plus (9 - life path).
pub const FIRST_PERIOD_END_AGE_BASE: u32 = 28;

/// Length of the second life period, in years.
pub const PERIOD_LENGTH: u32 = 27;

/// Compatibility level thresholds (0-100 overall score).
pub const EXCELLENT_THRESHOLD: u32 = 85;
pub const GOOD_THRESHOLD: u32 = 70;
pub const MODERATE_THRESHOLD: u32 = 50;

/// Minimum score for a date to count as auspicious.
pub const AUSPICIOUS_SCORE_FLOOR: u32 = 80;

/// Maximum number of auspicious dates returned per year scan.
pub const AUSPICIOUS_DATE_LIMIT: usize = 30;
