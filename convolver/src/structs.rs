use anyhow::{anyhow, Result};
use fast_plane_convolve as fpc;

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum Kernel {
    /// 3x3 lowpass kernel with 3 weight classes.
    Symmetric3,
    /// 5x5 lowpass kernel with 6 weight classes.
    Symmetric5,
    /// 5x5 lowpass kernel applied as two 1D passes.
    Separable5,
}

impl Kernel {
    pub fn radius(self) -> u32 {
        match self {
            Self::Symmetric3 => 1,
            Self::Symmetric5 | Self::Separable5 => 2,
        }
    }
}

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum Cpu {
    /// The best extension supported by CPU
    Auto,
    /// Portable code without explicit SIMD instructions
    None,
    Sse4,
    Avx2,
    Neon,
}

impl Cpu {
    pub fn cpu_extensions(self) -> Result<fpc::CpuExtensions> {
        let extensions = match self {
            Self::Auto => fpc::CpuExtensions::default(),
            Self::None => fpc::CpuExtensions::None,
            #[cfg(target_arch = "x86_64")]
            Self::Sse4 => fpc::CpuExtensions::Sse4_1,
            #[cfg(target_arch = "x86_64")]
            Self::Avx2 => fpc::CpuExtensions::Avx2,
            #[cfg(target_arch = "aarch64")]
            Self::Neon => fpc::CpuExtensions::Neon,
            #[allow(unreachable_patterns)]
            other => {
                return Err(anyhow!(
                    "{other:?} extension is not available for this architecture"
                ))
            }
        };
        if !extensions.is_supported() {
            return Err(anyhow!("{extensions:?} extension is not supported by CPU"));
        }
        Ok(extensions)
    }
}
