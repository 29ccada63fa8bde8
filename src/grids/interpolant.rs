use std::io::Write;

use num_traits::Float;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::errors::InterpError;
use crate::preparation::Preparation;
use crate::serialization::SerializationFormat;

use super::rectilinear::RectilinearGrid;

///
/// Owned axes and values of a tabulated function, e.g. a value function between two iterations of
/// a solver. Evaluation borrows a [`RectilinearGrid`] over the stored axes, so every entry point of
/// the grid (prepared, monotonic, repeat) is available through [`Interpolant::grid`].
///
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interpolant<T, const D: usize>
{
    #[serde_as(as = "[_; D]")]
    grids: [Vec<T>; D],
    values: Vec<T>,
}

impl<T: Float, const D: usize> Interpolant<T, D>
{
    pub fn new(grids: [Vec<T>; D], values: Vec<T>) -> Result<Self, InterpError>
    {
        let grid = RectilinearGrid::<T, D>::new(std::array::from_fn(|k| grids[k].as_slice()))?;
        if values.len() != grid.num_values()
        {
            return Err(InterpError::ValuesShapeMismatch);
        }
        Ok(Self { grids, values })
    }

    /// Tabulate `f` at every node.
    pub fn from_fn<F: Fn([T; D]) -> T>(grids: [Vec<T>; D], f: F) -> Result<Self, InterpError>
    {
        let mut interpolant = Self { grids, values: Vec::new() };
        let num_values = RectilinearGrid::new(interpolant.axes())?.num_values();
        interpolant.values = vec![T::zero(); num_values];
        interpolant.update_values(f);
        Ok(interpolant)
    }

    fn axes(&self) -> [&[T]; D]
    {
        std::array::from_fn(|k| self.grids[k].as_slice())
    }

    pub fn grid(&self) -> RectilinearGrid<'_, T, D>
    {
        RectilinearGrid::from_parts(self.axes())
    }

    pub fn values(&self) -> &[T]
    {
        &self.values
    }

    /// Values may be changed in place; the axes and any preparation stay valid.
    pub fn values_mut(&mut self) -> &mut [T]
    {
        &mut self.values
    }

    pub fn set_values(&mut self, values: Vec<T>) -> Result<(), InterpError>
    {
        if values.len() != self.values.len()
        {
            Err(InterpError::ValuesShapeMismatch)
        }
        else
        {
            self.values = values;
            Ok(())
        }
    }

    /// Set values using a given evaluation function at each node.
    pub fn update_values<F: Fn([T; D]) -> T>(&mut self, f: F)
    {
        let dims: [usize; D] = std::array::from_fn(|k| self.grids[k].len());
        let mut node = [0_usize; D];
        for value in self.values.iter_mut()
        {
            *value = f(std::array::from_fn(|k| self.grids[k][node[k]]));
            // advance the row-major counter, last dimension fastest
            for k in (0..D).rev()
            {
                node[k] += 1;
                if node[k] < dims[k]
                {
                    break;
                }
                node[k] = 0;
            }
        }
    }

    #[inline]
    pub fn interp(&self, x: [T; D]) -> T
    {
        self.grid().interp_unchecked(&self.values, x)
    }

    pub fn interp_vec(&self, xi: [&[T]; D], out: &mut [T]) -> Result<(), InterpError>
    {
        self.grid().interp_vec(&self.values, xi, out)
    }

    pub fn prepare(&self, fixed: &[T], batch_size: usize) -> Result<Preparation<T, D>, InterpError>
    {
        self.grid().prepare(fixed, batch_size)
    }

    pub fn interp_vec_mon(&self, prep: &mut Preparation<T, D>, xi_last: &[T], out: &mut [T]) -> Result<(), InterpError>
    {
        self.grid().interp_vec_mon(prep, &self.values, xi_last, out)
    }

    pub fn interp_vec_mon_rep(&self, prep: &Preparation<T, D>, out: &mut [T]) -> Result<(), InterpError>
    {
        self.grid().interp_vec_mon_rep(prep, &self.values, out)
    }
}

impl<T: Float + Serialize + DeserializeOwned, const D: usize> Interpolant<T, D>
{
    ///
    /// Write grid to buffer with the specified serialization format.
    ///
    pub fn write_buffer(&self, format: SerializationFormat) -> Result<Vec<u8>, InterpError>
    {
        crate::serialization::serialize(self, format)
    }

    ///
    /// Writes axes and values to `path`.
    ///
    pub fn write(&self, path: &str, format: SerializationFormat) -> Result<(), InterpError>
    {
        let mut file = std::io::BufWriter::new(std::fs::File::create(path).map_err(|_| InterpError::FileIOError)?);
        let buffer = self.write_buffer(format)?;
        file.write_all(&buffer).map_err(|_| InterpError::WriteBufferFailed)?;
        file.flush().map_err(|_| InterpError::WriteBufferFailed)?;
        Ok(())
    }

    ///
    /// Reads an interpolant, rejecting data whose axes or value count are invalid.
    ///
    pub fn read_buffer(buffer: &[u8], format: SerializationFormat) -> Result<Self, InterpError>
    {
        let raw: Self = crate::serialization::deserialize(buffer, format)?;
        Self::new(raw.grids, raw.values).map_err(|_| InterpError::DeserializationFailed)
    }

    ///
    /// Reads an interpolant from a reader.
    ///
    pub fn read<Reader: std::io::Read>(mut reader: Reader, format: SerializationFormat) -> Result<Self, InterpError>
    {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(|_| InterpError::ReadBufferFailed)?;
        Self::read_buffer(&bytes, format)
    }
}

#[test]
fn check_from_fn_layout()
{
    let interpolant = Interpolant::from_fn([vec![0.0, 1.0, 2.0], vec![10.0, 20.0]], |[x, y]| 100.0 * x + y).unwrap();
    assert_eq!(interpolant.values(), &[10.0, 20.0, 110.0, 120.0, 210.0, 220.0]);
    assert_eq!(interpolant.interp([1.5, 15.0]), 165.0);
}

#[test]
fn check_value_function_iteration()
{
    // v <- 0.5 * v + 1 converges to 2 everywhere; the cached brackets stay valid while values change
    let mut v = Interpolant::from_fn([vec![0.0, 0.3, 1.0, 2.5]], |_| 0.0).unwrap();
    let xs = [0.1, 0.2, 0.9, 1.7, 2.4];
    let mut prep = v.prepare(&[], xs.len()).unwrap();
    let mut out = [0.0; 5];
    v.interp_vec_mon(&mut prep, &xs, &mut out).unwrap();
    for _ in 0..60
    {
        for value in v.values_mut()
        {
            *value = 0.5 * *value + 1.0;
        }
        v.interp_vec_mon_rep(&prep, &mut out).unwrap();
    }
    for y in out
    {
        assert!((y - 2.0).abs() < 1e-12);
    }
}

#[test]
fn check_new_rejects_bad_shapes()
{
    assert_eq!(Interpolant::new([vec![0.0, 1.0]], vec![1.0]).unwrap_err(), InterpError::ValuesShapeMismatch);
    assert_eq!(Interpolant::new([vec![1.0, 0.0]], vec![1.0, 2.0]).unwrap_err(), InterpError::GridNotIncreasing);
    let mut ok = Interpolant::new([vec![0.0, 1.0]], vec![1.0, 2.0]).unwrap();
    assert_eq!(ok.set_values(vec![1.0]).unwrap_err(), InterpError::ValuesShapeMismatch);
}

#[test]
fn check_write_and_read()
{
    let interpolant = Interpolant::from_fn([vec![0.0, 0.5, 1.0], vec![-1.0, 1.0], vec![0.0, 3.0]], |[a, b, c]| a * b + c).unwrap();
    for format in [SerializationFormat::Json, SerializationFormat::BincodeLz4]
    {
        let buffer = interpolant.write_buffer(format).unwrap();
        let restored = Interpolant::<f64, 3>::read(buffer.as_slice(), format).unwrap();
        assert_eq!(restored, interpolant);
    }
    let path = std::env::temp_dir().join("gridinterp_check_write_and_read.bin");
    let path = path.to_str().unwrap();
    interpolant.write(path, SerializationFormat::default()).unwrap();
    let file = std::fs::File::open(path).unwrap();
    let restored = Interpolant::<f64, 3>::read(file, SerializationFormat::default()).unwrap();
    assert_eq!(restored.interp([0.25, 0.0, 1.0]), interpolant.interp([0.25, 0.0, 1.0]));
    std::fs::remove_file(path).unwrap();
}

#[test]
fn check_read_rejects_invalid_axes()
{
    let json = br#"{"grids":[[0.0,2.0,1.0]],"values":[0.0,1.0,2.0]}"#;
    assert_eq!(Interpolant::<f64, 1>::read_buffer(json, SerializationFormat::Json).unwrap_err(), InterpError::DeserializationFailed);
}
