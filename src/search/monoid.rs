use std::marker::PhantomData;

use num_traits::{Bounded, Zero};

/// Identity element plus an associative combine over a weight type.
///
/// `combine(identity(), x) == x` must hold for every `x`. The operation is
/// not required to be commutative, so the operand order passed to
/// `combine` is part of the contract of every caller.
pub trait Monoid {
    type Weight;

    fn identity(&self) -> Self::Weight;

    fn combine(&self, left: Self::Weight, right: Self::Weight) -> Self::Weight;
}

/// Plain sum of numeric weights.
pub struct Addition<T> {
    _weight: PhantomData<T>,
}

impl<T> Addition<T> {
    pub fn new() -> Self {
        Addition {
            _weight: PhantomData,
        }
    }
}

impl<T> Default for Addition<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Zero> Monoid for Addition<T> {
    type Weight = T;

    fn identity(&self) -> T {
        T::zero()
    }

    fn combine(&self, left: T, right: T) -> T {
        left + right
    }
}

/// Lightest edge along a path, i.e. the bottleneck capacity.
pub struct Minimum<T> {
    _weight: PhantomData<T>,
}

impl<T> Minimum<T> {
    pub fn new() -> Self {
        Minimum {
            _weight: PhantomData,
        }
    }
}

impl<T> Default for Minimum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Bounded + PartialOrd> Monoid for Minimum<T> {
    type Weight = T;

    fn identity(&self) -> T {
        T::max_value()
    }

    fn combine(&self, left: T, right: T) -> T {
        if right < left {
            right
        } else {
            left
        }
    }
}

/// Heaviest edge along a path.
pub struct Maximum<T> {
    _weight: PhantomData<T>,
}

impl<T> Maximum<T> {
    pub fn new() -> Self {
        Maximum {
            _weight: PhantomData,
        }
    }
}

impl<T> Default for Maximum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Bounded + PartialOrd> Monoid for Maximum<T> {
    type Weight = T;

    fn identity(&self) -> T {
        T::min_value()
    }

    fn combine(&self, left: T, right: T) -> T {
        if right > left {
            right
        } else {
            left
        }
    }
}

/// String concatenation. Not commutative.
#[derive(Default)]
pub struct Concatenation;

impl Monoid for Concatenation {
    type Weight = String;

    fn identity(&self) -> String {
        String::new()
    }

    fn combine(&self, mut left: String, right: String) -> String {
        left.push_str(&right);
        left
    }
}
