//! The total order shared by every tree operation.

use core::cmp::Ordering;

/// An element that can be stored in an [`LlrbTree`](crate::LlrbTree).
///
/// `less` must be a strict weak order: irreflexive, transitive, and with
/// incomparability (`!a.less(b) && !b.less(a)`) acting as equivalence. Two
/// elements that are neither less than the other have the same order and are
/// treated as the same key by lookups and replacing inserts.
///
/// Every `Ord` type is an `Item`. Types whose order depends on only part of
/// their value (a key field, say) implement this trait by hand.
pub trait Item {
    /// Returns `true` if `self` is ordered strictly before `than`.
    fn less(&self, than: &Self) -> bool;
}

impl<T: Ord + ?Sized> Item for T {
    #[inline]
    fn less(&self, than: &Self) -> bool {
        self < than
    }
}

/// One of the two extreme sentinels.
///
/// `Inf::Pos` is ordered after every element and `Inf::Neg` before every
/// element. Sentinels never enter a tree; they exist so callers can express
/// open-ended bounds when comparing stored elements through [`less`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Inf {
    Neg,
    Pos,
}

impl Inf {
    /// Returns `Inf::Pos` if `sign` is positive and `Inf::Neg` if it is negative.
    ///
    /// # Panics
    ///
    /// Panics if `sign` is zero.
    pub fn new(sign: i32) -> Inf {
        match sign.cmp(&0) {
            Ordering::Greater => Inf::Pos,
            Ordering::Less => Inf::Neg,
            Ordering::Equal => panic!("infinity sign must be non-zero"),
        }
    }
}

/// Shorthand for [`Inf::new`].
#[inline]
pub fn inf(sign: i32) -> Inf {
    Inf::new(sign)
}

/// Either a borrowed element or one of the extreme sentinels.
#[derive(Debug)]
pub enum Bound<'a, T: ?Sized> {
    Inf(Inf),
    Item(&'a T),
}

// Derives would require `T: Copy`.
impl<T: ?Sized> Clone for Bound<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Bound<'_, T> {}

impl<T: ?Sized> From<Inf> for Bound<'_, T> {
    fn from(inf: Inf) -> Self {
        Bound::Inf(inf)
    }
}

impl<'a, T: ?Sized> From<&'a T> for Bound<'a, T> {
    fn from(item: &'a T) -> Self {
        Bound::Item(item)
    }
}

/// Returns `true` if `x` is ordered strictly before `y`.
///
/// Real elements delegate to [`Item::less`]. `+inf` is before nothing and
/// `-inf` is after nothing, so comparing a sentinel with itself is `false`.
pub fn less<T: Item + ?Sized>(x: Bound<'_, T>, y: Bound<'_, T>) -> bool {
    match (x, y) {
        (Bound::Inf(Inf::Pos), _) | (_, Bound::Inf(Inf::Neg)) => false,
        (Bound::Inf(Inf::Neg), _) | (_, Bound::Inf(Inf::Pos)) => true,
        (Bound::Item(x), Bound::Item(y)) => x.less(y),
    }
}

// Orders the probe `key` relative to `elem`.
#[inline]
pub(crate) fn probe<T: Item + ?Sized>(key: &T, elem: &T) -> Ordering {
    if key.less(elem) {
        Ordering::Less
    } else if elem.less(key) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_bound_everything() {
        let pos = Bound::<u32>::Inf(inf(1));
        let neg = Bound::<u32>::Inf(inf(-7));

        for x in [0u32, 1, u32::MAX] {
            assert!(less(neg, Bound::Item(&x)));
            assert!(less(Bound::Item(&x), pos));
            assert!(!less(pos, Bound::Item(&x)));
            assert!(!less(Bound::Item(&x), neg));
        }

        assert!(less(neg, pos));
        assert!(!less(pos, neg));
    }

    #[test]
    fn sentinels_are_irreflexive() {
        let pos = Bound::<u32>::from(Inf::Pos);
        let neg = Bound::<u32>::from(Inf::Neg);

        assert!(!less(pos, pos));
        assert!(!less(neg, neg));
    }

    #[test]
    #[should_panic(expected = "sign")]
    fn zero_sign_panics() {
        inf(0);
    }

    #[test]
    fn items_delegate() {
        let (a, b) = (3u32, 4u32);
        assert!(less(Bound::from(&a), Bound::from(&b)));
        assert!(!less(Bound::from(&b), Bound::from(&a)));
        assert!(!less(Bound::from(&a), Bound::from(&a)));

        assert_eq!(probe(&a, &b), Ordering::Less);
        assert_eq!(probe(&b, &a), Ordering::Greater);
        assert_eq!(probe(&a, &a), Ordering::Equal);
    }
}
