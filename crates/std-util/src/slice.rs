use rand::{seq::SliceRandom, thread_rng};

pub trait SliceUtil {
    /// Shuffle the slice
    fn shuffle<T>(&mut self)
    where
        Self: AsMut<[T]>,
    {
        shuffle(self.as_mut())
    }
}

impl<T> SliceUtil for [T] {}

pub fn shuffle<T>(slice: &mut [T]) {
    SliceRandom::shuffle(slice, &mut thread_rng());
}
