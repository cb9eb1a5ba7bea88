//! `Render` implementations for standard library and time types.
//!
//! ## Containers
//!
//! References and smart pointers render their target. `Option` renders `nil`
//! when empty. Sequences render through `Render::render_elements`, which lets
//! `u8` replace non-empty buffers with `<binary data>` while every other
//! element type renders as a bracketed list.
//!
//! ## External Types
//!
//! Types from other crates that are not covered here can be rendered through a
//! newtype deriving `Scan`, or through `#[scan(display)]` when they implement
//! `Display`.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    marker::PhantomData,
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
    path::{Path, PathBuf},
    rc::Rc,
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use chrono::{DateTime, SecondsFormat, TimeDelta, TimeZone, Utc};

use super::{
    fmt_duration, mapping, render_display, sequence, Render, BINARY_PLACEHOLDER, NIL,
};

// =============================================================================
// Primitives
// =============================================================================

macro_rules! impl_render_literal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Render for $ty {
                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_render_literal!(
    bool, char, i8, i16, i32, i64, i128, isize, u16, u32, u64, u128, usize, f32, f64, str,
    String,
);

impl Render for u8 {
    fn render(&self) -> String {
        self.to_string()
    }

    fn render_elements<'a, I>(items: I) -> String
    where
        Self: 'a,
        I: ExactSizeIterator<Item = &'a Self>,
    {
        match items.len() {
            0 => sequence(std::iter::empty()),
            _ => BINARY_PLACEHOLDER.to_string(),
        }
    }
}

impl Render for Cow<'_, str> {
    fn render(&self) -> String {
        self.as_ref().to_string()
    }
}

impl Render for Path {
    fn render(&self) -> String {
        self.display().to_string()
    }
}

impl Render for PathBuf {
    fn render(&self) -> String {
        self.as_path().render()
    }
}

// =============================================================================
// Stringables
// =============================================================================

macro_rules! impl_render_stringable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Render for $ty {
                fn render(&self) -> String {
                    render_display(self)
                }
            }
        )*
    };
}

impl_render_stringable!(IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr);

/// Markers carry no data and render like an empty record.
impl<T> Render for PhantomData<T>
where
    T: ?Sized,
{
    fn render(&self) -> String {
        "{}".to_string()
    }
}

// =============================================================================
// Time
// =============================================================================

impl<Tz> Render for DateTime<Tz>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    fn render(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Instants outside the range `DateTime` can hold fall back to their `Debug` form.
impl Render for SystemTime {
    fn render(&self) -> String {
        system_time_to_utc(*self).map_or_else(|| format!("{self:?}"), |instant| instant.render())
    }
}

fn system_time_to_utc(time: SystemTime) -> Option<DateTime<Utc>> {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => {
            let secs = i64::try_from(after.as_secs()).ok()?;
            DateTime::from_timestamp(secs, after.subsec_nanos())
        }
        Err(err) => {
            let before = err.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            match before.subsec_nanos() {
                0 => DateTime::from_timestamp(-secs, 0),
                nanos => DateTime::from_timestamp(-secs - 1, 1_000_000_000 - nanos),
            }
        }
    }
}

impl Render for Duration {
    fn render(&self) -> String {
        fmt_duration(i128::try_from(self.as_nanos()).unwrap_or(i128::MAX))
    }
}

impl Render for TimeDelta {
    fn render(&self) -> String {
        let nanos = i128::from(self.num_seconds()) * 1_000_000_000
            + i128::from(self.subsec_nanos());
        fmt_duration(nanos)
    }
}

// =============================================================================
// References
// =============================================================================

impl<T> Render for Option<T>
where
    T: Render,
{
    fn render(&self) -> String {
        self.as_ref().map_or_else(|| NIL.to_string(), Render::render)
    }
}

impl<T> Render for &T
where
    T: Render + ?Sized,
{
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T> Render for &mut T
where
    T: Render + ?Sized,
{
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T> Render for Box<T>
where
    T: Render + ?Sized,
{
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T> Render for Rc<T>
where
    T: Render + ?Sized,
{
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T> Render for Arc<T>
where
    T: Render + ?Sized,
{
    fn render(&self) -> String {
        (**self).render()
    }
}

// =============================================================================
// Sequences
// =============================================================================

impl<T> Render for [T]
where
    T: Render,
{
    fn render(&self) -> String {
        T::render_elements(self.iter())
    }
}

impl<T, const N: usize> Render for [T; N]
where
    T: Render,
{
    fn render(&self) -> String {
        T::render_elements(self.iter())
    }
}

impl<T> Render for Vec<T>
where
    T: Render,
{
    fn render(&self) -> String {
        T::render_elements(self.iter())
    }
}

impl<T> Render for VecDeque<T>
where
    T: Render,
{
    fn render(&self) -> String {
        T::render_elements(self.iter())
    }
}

impl<T, S> Render for HashSet<T, S>
where
    T: Render,
{
    fn render(&self) -> String {
        sequence(self.iter().map(Render::render))
    }
}

impl<T> Render for BTreeSet<T>
where
    T: Render,
{
    fn render(&self) -> String {
        sequence(self.iter().map(Render::render))
    }
}

// =============================================================================
// Maps
// =============================================================================

impl<K, V, S> Render for HashMap<K, V, S>
where
    K: Render,
    V: Render,
{
    fn render(&self) -> String {
        mapping(self.iter())
    }
}

impl<K, V> Render for BTreeMap<K, V>
where
    K: Render,
    V: Render,
{
    fn render(&self) -> String {
        mapping(self.iter())
    }
}
