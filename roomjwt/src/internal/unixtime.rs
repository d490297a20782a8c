use serde::{Deserialize, Serialize};
use time::error::ComponentRange;
use time::{Duration, OffsetDateTime};

//--------------------------------------------------------------------------------------------------
// Unix Timestamp handling
//--------------------------------------------------------------------------------------------------

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Seconds(u32);

impl Seconds {
    pub fn get(self) -> u32 {
        self.0
    }
}

pub const ONE_HOUR: Seconds = Seconds(3600);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnixTimestamp(OffsetDateTime);

impl Serialize for UnixTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.unix_timestamp().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UnixTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let timestamp = i64::deserialize(deserializer)?;
        UnixTimestamp::from_unix(timestamp).map_err(serde::de::Error::custom)
    }
}

impl From<UnixTimestamp> for OffsetDateTime {
    fn from(ts: UnixTimestamp) -> Self {
        ts.0
    }
}

impl UnixTimestamp {
    pub fn from_unix(seconds: i64) -> Result<Self, ComponentRange> {
        OffsetDateTime::from_unix_timestamp(seconds).map(UnixTimestamp)
    }

    pub fn now() -> Self {
        // Drop the sub-second part so the value round-trips through a claim unchanged
        let now = OffsetDateTime::now_utc();
        UnixTimestamp(now.replace_nanosecond(0).unwrap_or(now))
    }

    pub fn unix_seconds(self) -> i64 {
        self.0.unix_timestamp()
    }

    pub fn add_one_hour(self) -> Self {
        self.add_seconds(ONE_HOUR)
    }

    pub fn add_seconds(self, seconds: Seconds) -> Self {
        UnixTimestamp(self.0 + Duration::seconds(i64::from(seconds.0)))
    }

    pub fn seconds_until(self, later: UnixTimestamp) -> i64 {
        later.unix_seconds() - self.unix_seconds()
    }
}

//--------------------------------------------------------------------------------------------------
// Clock used for issuing and verifying claims
//--------------------------------------------------------------------------------------------------

pub trait Clock {
    fn now(&self) -> UnixTimestamp;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> UnixTimestamp {
        (**self).now()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> UnixTimestamp {
        UnixTimestamp::now()
    }
}

/// A clock frozen at one instant, for reproducible tokens.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(UnixTimestamp);

impl FixedClock {
    pub fn new(at: UnixTimestamp) -> Self {
        FixedClock(at)
    }

    pub fn at_unix(seconds: i64) -> Result<Self, ComponentRange> {
        UnixTimestamp::from_unix(seconds).map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> UnixTimestamp {
        self.0
    }
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_hour_is_3600_seconds() {
        let start = UnixTimestamp::from_unix(1_700_000_000).unwrap();
        assert_eq!(start.add_one_hour().unix_seconds(), 1_700_003_600);
        assert_eq!(start.seconds_until(start.add_one_hour()), 3600);
    }

    #[test]
    fn test_serializes_as_integer_seconds() {
        let ts = UnixTimestamp::from_unix(42).unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "42");
        let back: UnixTimestamp = serde_json::from_str("42").unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn test_now_has_whole_seconds() {
        let now = UnixTimestamp::now();
        assert_eq!(OffsetDateTime::from(now).nanosecond(), 0);
    }

    #[test]
    fn test_fixed_clock_does_not_advance() {
        let clock = FixedClock::at_unix(1_000).unwrap();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().unix_seconds(), 1_000);
    }
}
