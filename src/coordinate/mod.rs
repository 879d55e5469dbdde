use crate::prelude::*;
pub mod coor2d;

/// `CoordinateSet` is the coordinate access interface used by the operators.
/// Strictly speaking, it is not a set, but rather an indexed list, i.e. an
/// array.
///
/// It is implemented as an accessor trait, that allows operators to access
/// any user provided data model by iterating over its elements, represented
/// as a `Coor2D`
pub trait CoordinateSet {
    /// Number of coordinate tuples in the set
    fn len(&self) -> usize;

    /// Access the `index`th coordinate tuple
    fn get_coord(&self, index: usize) -> Coor2D;

    /// Overwrite the `index`th coordinate tuple
    fn set_coord(&mut self, index: usize, value: &Coor2D);

    /// Companion to `len()`
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set all coordinate tuples in the set to NaN
    fn stomp(&mut self) {
        let nanny = Coor2D::nan();
        for i in 0..self.len() {
            self.set_coord(i, &nanny);
        }
    }
}

// ----- Implementations for the common containers -----------------------------

impl<const N: usize> CoordinateSet for [Coor2D; N] {
    fn len(&self) -> usize {
        N
    }
    fn get_coord(&self, index: usize) -> Coor2D {
        self[index]
    }
    fn set_coord(&mut self, index: usize, value: &Coor2D) {
        self[index] = *value;
    }
}

impl CoordinateSet for &mut [Coor2D] {
    fn len(&self) -> usize {
        (**self).len()
    }
    fn get_coord(&self, index: usize) -> Coor2D {
        self[index]
    }
    fn set_coord(&mut self, index: usize, value: &Coor2D) {
        self[index] = *value;
    }
}

impl CoordinateSet for Vec<Coor2D> {
    fn len(&self) -> usize {
        self.len()
    }
    fn get_coord(&self, index: usize) -> Coor2D {
        self[index]
    }
    fn set_coord(&mut self, index: usize, value: &Coor2D) {
        self[index] = *value;
    }
}

// ----- T E S T S ---------------------------------------------------
