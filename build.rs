//! Compiles the evaluation kernels to PTX for the `cuda` feature.
//!
//! `CUDA_PATH` points at a toolkit install when `nvcc` is not on `PATH`;
//! `EVALKERN_CUDA_ARCH` overrides the `-arch` target (default `sm_75`).

fn main() {
    #[cfg(feature = "cuda")]
    ptx::build_all();
}

#[cfg(feature = "cuda")]
mod ptx {
    use std::env;
    use std::path::{Path, PathBuf};
    use std::process::Command;

    const KERNEL_DIR: &str = "src/runtime/cuda/kernels";
    /// One module per operation family; all share `common.cuh`.
    const MODULES: [&str; 5] = ["channel", "pool", "layout", "cast", "affine"];

    pub fn build_all() {
        let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));
        let src_dir = Path::new(KERNEL_DIR);
        let arch = env::var("EVALKERN_CUDA_ARCH").unwrap_or_else(|_| "sm_75".into());
        let nvcc = locate_nvcc();

        println!("cargo:rerun-if-env-changed=CUDA_PATH");
        println!("cargo:rerun-if-env-changed=EVALKERN_CUDA_ARCH");
        println!("cargo:rerun-if-changed={}", src_dir.join("common.cuh").display());

        for module in MODULES {
            let source = src_dir.join(format!("{module}.cu"));
            println!("cargo:rerun-if-changed={}", source.display());

            // Fast-math is off: the mean block must divide exactly like the CPU path
            let status = Command::new(&nvcc)
                .args(["-ptx", "-O3"])
                .arg(format!("-arch={arch}"))
                .arg("-I")
                .arg(src_dir)
                .arg("-o")
                .arg(out_dir.join(format!("{module}.ptx")))
                .arg(&source)
                .status()
                .unwrap_or_else(|e| panic!("could not run {}: {e}", nvcc.display()));
            assert!(
                status.success(),
                "nvcc failed on {} for {arch}",
                source.display()
            );
        }

        println!("cargo:rustc-env=CUDA_KERNEL_DIR={}", out_dir.display());
    }

    /// `$CUDA_PATH/bin/nvcc` when set, otherwise whatever `PATH` resolves.
    fn locate_nvcc() -> PathBuf {
        env::var_os("CUDA_PATH")
            .map(|root| PathBuf::from(root).join("bin").join("nvcc"))
            .filter(|candidate| candidate.exists())
            .unwrap_or_else(|| PathBuf::from("nvcc"))
    }
}
