macro_rules! info {
    ( $($arg:tt)+ ) => (
        #[cfg(feature = "defmt")]
        defmt::info!($($arg)+);
    );
}

macro_rules! warning {
    ( $($arg:tt)+ ) => (
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)+);
    );
}

macro_rules! debug {
    ( $($arg:tt)+ ) => (
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)+);
    );
}

pub(crate) use {debug, info, warning};
