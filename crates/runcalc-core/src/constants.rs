// ABOUTME: Physiological and unit constants for the running performance calculators
// ABOUTME: Daniels regression coefficients, Riegel exponent, unit factors, validation defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! Constants based on published running-science formulas
//!
//! The coefficients are reproduced exactly as published so that outputs
//! match the reference tables digit for digit.

/// Unit conversion factors
pub mod units {
    /// Kilometers in one statute mile
    pub const KM_PER_MILE: f64 = 1.609_344;

    /// Seconds in one minute
    pub const SECONDS_PER_MINUTE: f64 = 60.0;

    /// Minutes in one hour, used for pace/speed reciprocals
    pub const MINUTES_PER_HOUR: f64 = 60.0;

    /// Meters in one kilometer
    pub const METERS_PER_KM: f64 = 1000.0;
}

/// Jack Daniels' VDOT regression coefficients
///
/// References:
/// - Daniels, J. & Gilbert, J. (1979). Oxygen Power: Performance Tables for Distance Runners
/// - Daniels, J. (2013). Daniels' Running Formula (3rd ed.). Human Kinetics.
pub mod daniels {
    /// Oxygen cost constant term (ml/kg/min)
    pub const VO2_COST_C: f64 = -4.6;
    /// Oxygen cost linear coefficient on velocity (m/min)
    pub const VO2_COST_B: f64 = 0.182_258;
    /// Oxygen cost quadratic coefficient on velocity
    pub const VO2_COST_A: f64 = 0.000_104;

    /// Sustainable fraction of VO2max: asymptote
    pub const MAX_FRACTION_BASE: f64 = 0.8;
    /// Sustainable fraction: slow exponential amplitude
    pub const MAX_FRACTION_SLOW_AMPLITUDE: f64 = 0.189_439_3;
    /// Sustainable fraction: slow exponential rate (per minute)
    pub const MAX_FRACTION_SLOW_RATE: f64 = -0.012_778;
    /// Sustainable fraction: fast exponential amplitude
    pub const MAX_FRACTION_FAST_AMPLITUDE: f64 = 0.298_955_8;
    /// Sustainable fraction: fast exponential rate (per minute)
    pub const MAX_FRACTION_FAST_RATE: f64 = -0.193_260_5;

    /// Velocity from VDOT: constant term (m/min)
    pub const VELOCITY_C: f64 = 29.54;
    /// Velocity from VDOT: linear coefficient
    pub const VELOCITY_B: f64 = 5.000_663;
    /// Velocity from VDOT: quadratic coefficient
    pub const VELOCITY_A: f64 = -0.007_546;

    /// Runners below this VDOT get slow-runner adjusted training paces
    pub const SLOW_RUNNER_THRESHOLD: f64 = 39.0;
    /// Slow-runner adjustment: scale applied to raw VDOT
    pub const SLOW_RUNNER_SCALE: f64 = 2.0 / 3.0;
    /// Slow-runner adjustment: offset added after scaling
    pub const SLOW_RUNNER_OFFSET: f64 = 13.0;

    /// Effort fraction for the faster end of the easy range
    pub const EASY_EFFORT: f64 = 0.70;
    /// Effort fraction for the slower end of the easy range
    pub const EASY_SLOW_EFFORT: f64 = 0.62;
    /// Effort fraction for threshold pace
    pub const THRESHOLD_EFFORT: f64 = 0.88;
    /// Effort fraction for interval pace
    pub const INTERVAL_EFFORT: f64 = 0.975;
    /// Effort fraction for race prediction
    pub const RACE_EFFORT: f64 = 1.0;

    /// Repetition pace is this many seconds per 400m faster than interval pace
    pub const REPETITION_CORRECTION_SECONDS_PER_400M: f64 = 6.0;
    /// Reference length for the repetition correction
    pub const REPETITION_CORRECTION_METERS: f64 = 400.0;

    /// Marathon distance used by the marathon-velocity refinement
    pub const MARATHON_METERS: f64 = 42_195.0;
    /// Fixed number of Newton refinements; outputs depend on this exact count
    pub const MARATHON_NEWTON_ITERATIONS: usize = 3;

    /// Marathon refinement coefficients as published (they differ slightly
    /// from the general regression in the last digits)
    pub mod marathon {
        /// Fast exponential rate used in the correction factor
        pub const FAST_RATE: f64 = 0.193_261;
        /// Fast exponential rate used in the derivative
        pub const FAST_RATE_DERIVATIVE: f64 = 0.193_26;
        /// Fast exponential amplitude
        pub const FAST_AMPLITUDE: f64 = 0.298_956;
        /// Slow exponential rate
        pub const SLOW_RATE: f64 = -0.012_778;
        /// Slow exponential amplitude
        pub const SLOW_AMPLITUDE: f64 = 0.189_439;
        /// Correction factor asymptote
        pub const BASE: f64 = 0.8;
        /// Quadratic velocity coefficient in the forward evaluation
        pub const VELOCITY_A: f64 = -0.0075;
        /// Quadratic velocity coefficient in the derivative
        pub const VELOCITY_A_DERIVATIVE: f64 = -0.007_546;
        /// Linear velocity coefficient
        pub const VELOCITY_B: f64 = 5.000_663;
        /// Velocity constant term
        pub const VELOCITY_C: f64 = 29.54;
        /// Initial time guess divisor: t0 = distance / (4 * vdot)
        pub const INITIAL_GUESS_DIVISOR: f64 = 4.0;
    }
}

/// Riegel power-law endurance model
///
/// Reference: Riegel, P.S. (1981). "Athletic records and human endurance."
/// *American Scientist*, 69(3), 285-290.
pub mod riegel {
    /// Fatigue exponent in T2 = T1 x (D2/D1)^k
    pub const FATIGUE_EXPONENT: f64 = 1.06;
}

/// Default plausibility limits applied before any fitted model is consulted
pub mod validation {
    /// Shortest distance accepted for fitted-model predictions (meters)
    pub const MIN_DISTANCE_METERS: f64 = 400.0;
    /// Longest distance accepted (100 miles, meters)
    pub const MAX_DISTANCE_METERS: f64 = 160_934.0;
    /// Fastest plausible pace (seconds per km)
    pub const MIN_PACE_SECONDS_PER_KM: f64 = 60.0;
    /// Slowest plausible pace (seconds per km)
    pub const MAX_PACE_SECONDS_PER_KM: f64 = 1200.0;
}
