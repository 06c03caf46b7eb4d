use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneBufferError {
    #[error("Size of buffer is smaller than required")]
    InvalidBufferSize,
    #[error("Stride of rows is smaller than width of plane")]
    InvalidStride,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectError {
    #[error("Position of the rect is out of the plane boundaries")]
    PositionIsOutOfPlaneBoundaries,
    #[error("Size of the rect is out of the plane boundaries")]
    SizeIsOutOfPlaneBoundaries,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvolveError {
    #[error(transparent)]
    Rect(#[from] RectError),
    #[error("Rect {width}x{height} must be larger than the kernel radius {radius} in both dimensions")]
    RectTooSmall { width: u32, height: u32, radius: u32 },
    #[error("The dimensions of the destination plane are not equal to the dimensions of the rect")]
    DifferentDimensions,
}

#[derive(Error, Debug)]
pub enum ThreadPoolError {
    #[cfg(feature = "rayon")]
    #[error("Failed to build thread pool: {0}")]
    Build(#[from] rayon::ThreadPoolBuildError),
    #[error("Initialization of the thread pool task failed")]
    InitFailed,
}
