use crate::table::*;
use crate::window::Window;
use log::debug;
use std::num::NonZeroU32;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// `v` zero bits followed by a one.
pub fn unary(window: Window, index: u32) -> Entry {
    // No terminating one inside the window.
    if index == 0 {
        return Entry::MISS;
    }

    let value = window.leading_zeros(index);
    Entry {
        value: value as u16,
        len: (value + 1) as u8,
    }
}

/// `z` zeros, a one, then `z` mantissa bits of `v + 1`.
pub fn gamma(window: Window, index: u32) -> Entry {
    let prefix = unary(window, index);
    if prefix.is_miss() {
        return Entry::MISS;
    }

    let zeros = prefix.value as u32;
    let unary_len = prefix.len as u32;
    let code_len = 2 * unary_len - 1;
    if code_len > window.bits() {
        return Entry::MISS;
    }

    let mantissa = window.extract(index, unary_len, zeros);
    Entry {
        value: (mantissa + (1 << zeros) - 1) as u16,
        len: code_len as u8,
    }
}

/// Truncated binary code for a value in `0..max`, read most significant bit
/// first from the top `available` bits of `bits`.
///
/// Returns the value and the number of bits it used, which is zero when
/// `max == 1`. `None` if the codeword runs past `available`.
pub fn minimal_binary(bits: u32, available: u32, max: u64) -> Option<(u64, u32)> {
    debug_assert!(max > 0);
    let l = u64::BITS - 1 - max.leading_zeros();
    let u = if max.is_power_of_two() { l } else { l + 1 };
    if l > available {
        return None;
    }

    let shortfall = (1u64 << u) - max;
    let n = top_bits(bits, available, l) as u64;
    if n < shortfall {
        return Some((n, l));
    }

    if u > available {
        return None;
    }
    let m = top_bits(bits, available, u) as u64;
    Some((m - shortfall, u))
}

fn top_bits(bits: u32, available: u32, len: u32) -> u32 {
    if len == 0 {
        0
    } else {
        bits >> (available - len)
    }
}

/// Unary bucket index `h`, then the offset of `v + 1` inside
/// `[2^(h*k), 2^((h+1)*k))` as a truncated binary code.
pub fn zeta(window: Window, k: NonZeroU32, index: u32) -> Entry {
    let prefix = unary(window, index);
    if prefix.is_miss() {
        return Entry::MISS;
    }

    let h = prefix.value as u32;
    let unary_len = prefix.len as u32;
    let k = k.get();

    // Buckets this wide need far more bits than any window holds.
    let (lo_exp, hi_exp) = match (h.checked_mul(k), (h + 1).checked_mul(k)) {
        (Some(lo), Some(hi)) if hi < u64::BITS => (lo, hi),
        _ => return Entry::MISS,
    };
    let l_bound = 1u64 << lo_exp;
    let u_bound = 1u64 << hi_exp;

    let available = window.bits() - unary_len;
    let rest = window.extract(index, unary_len, available);
    match minimal_binary(rest, available, u_bound - l_bound) {
        Some((r, extra_len)) => {
            let value = l_bound + r - 1;
            debug_assert!(value < MISS as u64);
            Entry {
                value: value as u16,
                len: (unary_len + extra_len) as u8,
            }
        }
        None => Entry::MISS,
    }
}

fn entry(code: Code, window: Window, index: u32) -> Entry {
    match code {
        Code::Unary => unary(window, index),
        Code::Gamma => gamma(window, index),
        Code::Zeta(k) => zeta(window, k, index),
    }
}

impl CodeTable {
    pub fn new(code: Code, window: Window) -> Self {
        #[cfg(feature = "rayon")]
        let entries: Vec<Entry> = (0..window.size() as u32)
            .into_par_iter()
            .map(|i| entry(code, window, i))
            .collect();
        #[cfg(not(feature = "rayon"))]
        let entries: Vec<Entry> = (0..window.size() as u32)
            .map(|i| entry(code, window, i))
            .collect();

        let table = Self {
            code,
            window,
            entries,
        };
        debug!(
            "built {} table for {}-bit window: {} entries, {} misses",
            code,
            window.bits(),
            table.len(),
            table.misses()
        );
        table
    }
}
