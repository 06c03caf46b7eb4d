/// Defines `$name(cpu_extensions, args...)` which calls
/// `$generic::<V>(args...)` with the vector type of the given extension.
///
/// Every backend gets its own copy of the generic function, compiled
/// with target features of the backend.
macro_rules! dispatch_by_cpu {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident($($arg:ident: $ty:ty),* $(,)?) => $generic:ident
    ) => {
        $(#[$meta])*
        $vis fn $name(cpu_extensions: crate::CpuExtensions, $($arg: $ty),*) {
            #[cfg(target_arch = "x86_64")]
            #[target_feature(enable = "avx2")]
            unsafe fn avx2($($arg: $ty),*) {
                $generic::<crate::simd::avx2::F32x8Avx2>($($arg),*)
            }

            #[cfg(target_arch = "x86_64")]
            #[target_feature(enable = "sse4.1")]
            unsafe fn sse4($($arg: $ty),*) {
                $generic::<crate::simd::sse4::F32x4Sse>($($arg),*)
            }

            #[cfg(target_arch = "aarch64")]
            #[target_feature(enable = "neon")]
            unsafe fn neon($($arg: $ty),*) {
                $generic::<crate::simd::neon::F32x4Neon>($($arg),*)
            }

            // Callers guarantee the extension is supported by CPU.
            match cpu_extensions {
                #[cfg(target_arch = "x86_64")]
                crate::CpuExtensions::Avx2 => unsafe { avx2($($arg),*) },
                #[cfg(target_arch = "x86_64")]
                crate::CpuExtensions::Sse4_1 => unsafe { sse4($($arg),*) },
                #[cfg(target_arch = "aarch64")]
                crate::CpuExtensions::Neon => unsafe { neon($($arg),*) },
                crate::CpuExtensions::None => unsafe {
                    $generic::<crate::simd::native::F32x8>($($arg),*)
                },
            }
        }
    };
}
