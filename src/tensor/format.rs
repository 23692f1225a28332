//! Memory layout tags and the shape geometry they imply

use std::fmt;

/// Memory layout of a batched image tensor
///
/// The tag selects the indexing formula every kernel uses. It is never stored
/// in the buffer; each operation takes it as an argument.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataFormat {
    /// Channel-major: `[n, c, h, w]`, spatial position varies fastest
    Nchw,
    /// Channel-minor: `[n, h, w, c]`, channel varies fastest
    Nhwc,
}

/// Batch, channel and flattened spatial extents of a tensor view
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlaneDims {
    /// Batch size
    pub n: usize,
    /// Channel count
    pub c: usize,
    /// Number of spatial positions (`h * w`)
    pub xy: usize,
}

impl PlaneDims {
    /// Total element count
    #[inline]
    pub fn numel(&self) -> usize {
        self.n * self.c * self.xy
    }
}

/// Batch, channel and explicit spatial extents of a rank-4 tensor view
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ImageDims {
    /// Batch size
    pub n: usize,
    /// Channel count
    pub c: usize,
    /// Height (Y extent)
    pub h: usize,
    /// Width (X extent)
    pub w: usize,
}

impl DataFormat {
    /// The other layout
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Self::Nchw => Self::Nhwc,
            Self::Nhwc => Self::Nchw,
        }
    }

    /// Index of the channel axis for a tensor of the given rank
    #[inline]
    pub fn channel_axis(self, rank: usize) -> usize {
        match self {
            Self::Nchw => 1,
            Self::Nhwc => rank - 1,
        }
    }

    /// Spatial extents of a shape (everything except batch and channel)
    ///
    /// Returns an empty slice for shapes of rank < 2.
    pub fn spatial(self, shape: &[usize]) -> &[usize] {
        if shape.len() < 2 {
            return &[];
        }
        match self {
            Self::Nchw => &shape[2..],
            Self::Nhwc => &shape[1..shape.len() - 1],
        }
    }

    /// Interpret a rank-3 or rank-4 shape as `(n, c, xy)`
    pub fn plane_dims(self, shape: &[usize]) -> Option<PlaneDims> {
        if shape.len() != 3 && shape.len() != 4 {
            return None;
        }
        let c = shape[self.channel_axis(shape.len())];
        let xy = self.spatial(shape).iter().product();
        Some(PlaneDims { n: shape[0], c, xy })
    }

    /// Interpret a rank-4 shape as `(n, c, h, w)`
    pub fn image_dims(self, shape: &[usize]) -> Option<ImageDims> {
        match (self, shape) {
            (Self::Nchw, &[n, c, h, w]) => Some(ImageDims { n, c, h, w }),
            (Self::Nhwc, &[n, h, w, c]) => Some(ImageDims { n, c, h, w }),
            _ => None,
        }
    }

    /// Build a shape in this layout from batch, channel and spatial extents
    pub fn shape(self, n: usize, c: usize, spatial: &[usize]) -> Vec<usize> {
        let mut shape = Vec::with_capacity(spatial.len() + 2);
        shape.push(n);
        if self == Self::Nchw {
            shape.push(c);
        }
        shape.extend_from_slice(spatial);
        if self == Self::Nhwc {
            shape.push(c);
        }
        shape
    }

    /// Same shape with the channel extent replaced
    pub fn with_channels(self, shape: &[usize], c: usize) -> Vec<usize> {
        let mut out = shape.to_vec();
        if !out.is_empty() {
            let axis = self.channel_axis(out.len());
            out[axis] = c;
        }
        out
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nchw => write!(f, "NCHW"),
            Self::Nhwc => write!(f, "NHWC"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_dims() {
        let nchw = DataFormat::Nchw.plane_dims(&[2, 3, 4, 5]).unwrap();
        assert_eq!(nchw, PlaneDims { n: 2, c: 3, xy: 20 });

        let nhwc = DataFormat::Nhwc.plane_dims(&[2, 4, 5, 3]).unwrap();
        assert_eq!(nhwc, PlaneDims { n: 2, c: 3, xy: 20 });

        let rank3 = DataFormat::Nhwc.plane_dims(&[2, 20, 3]).unwrap();
        assert_eq!(rank3, nhwc);

        assert!(DataFormat::Nchw.plane_dims(&[2, 3]).is_none());
    }

    #[test]
    fn test_image_dims() {
        let dims = DataFormat::Nhwc.image_dims(&[1, 19, 18, 7]).unwrap();
        assert_eq!((dims.n, dims.c, dims.h, dims.w), (1, 7, 19, 18));
        assert!(DataFormat::Nchw.image_dims(&[1, 7, 361]).is_none());
    }

    #[test]
    fn test_shape_builders() {
        assert_eq!(DataFormat::Nchw.shape(2, 3, &[4, 5]), vec![2, 3, 4, 5]);
        assert_eq!(DataFormat::Nhwc.shape(2, 3, &[4, 5]), vec![2, 4, 5, 3]);
        assert_eq!(
            DataFormat::Nhwc.with_channels(&[2, 4, 5, 3], 8),
            vec![2, 4, 5, 8]
        );
        assert_eq!(DataFormat::Nchw.spatial(&[2, 3, 4, 5]), &[4, 5]);
        assert_eq!(DataFormat::Nhwc.spatial(&[2, 4, 5, 3]), &[4, 5]);
        assert_eq!(DataFormat::Nchw.flipped(), DataFormat::Nhwc);
    }
}
