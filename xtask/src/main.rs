//! Build automation for ocm-addons
//!
//! Usage: cargo xtask <command>
//!
//! Available commands:
//! - build: Build the project
//! - test: Run tests
//! - dist: Create the release archive for one platform
//! - install: Install the plug-in where `ocm` can find it
//! - ci: Run CI checks

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use xshell::{cmd, Shell};

const BINARY: &str = "ocm-addons";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for ocm-addons")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the project
    Build {
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
    /// Create ocm-addons_<version>_<os>_<arch>.tar.gz with build metadata stamped in
    Dist {
        /// Target triple (e.g., x86_64-unknown-linux-gnu)
        #[arg(long)]
        target: Option<String>,

        /// Name recorded as the builder
        #[arg(long, default_value = "xtask")]
        built_by: String,
    },
    /// Install to system
    Install {
        /// Installation prefix (default: /usr/local)
        #[arg(long, default_value = "/usr/local")]
        prefix: String,
    },
    /// Run CI checks (format, clippy, test)
    Ci,
    /// Format code
    Format {
        /// Check formatting without modifying files
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;

    sh.change_dir(project_root());

    match cli.command {
        Commands::Build { release } => build(&sh, release),
        Commands::Test { integration } => test(&sh, integration),
        Commands::Dist { target, built_by } => dist(&sh, target, &built_by),
        Commands::Install { prefix } => install(&sh, &prefix),
        Commands::Ci => ci(&sh),
        Commands::Format { check } => format(&sh, check),
        Commands::Clippy => clippy(&sh),
    }
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    println!("🔨 Building {}...", BINARY);

    if release {
        cmd!(sh, "cargo build --release").run()?;
        println!("✅ Release build completed: target/release/{}", BINARY);
    } else {
        cmd!(sh, "cargo build").run()?;
        println!("✅ Debug build completed: target/debug/{}", BINARY);
    }

    Ok(())
}

fn test(sh: &Shell, integration: bool) -> Result<()> {
    println!("🧪 Running tests...");

    if integration {
        cmd!(sh, "cargo test --test '*'").run()?;
    } else {
        cmd!(sh, "cargo test --all").run()?;
    }

    println!("✅ All tests passed");
    Ok(())
}

fn dist(sh: &Shell, target: Option<String>, built_by: &str) -> Result<()> {
    println!("📦 Creating distribution package...");

    let version = env!("CARGO_PKG_VERSION");
    let commit = cmd!(sh, "git rev-parse HEAD")
        .read()
        .unwrap_or_else(|_| "unknown".to_string());
    let date = cmd!(sh, "date -u +%Y-%m-%dT%H:%M:%SZ").read()?;

    let _version = sh.push_env("OCM_ADDONS_VERSION", version);
    let _commit = sh.push_env("OCM_ADDONS_COMMIT", commit.trim());
    let _date = sh.push_env("OCM_ADDONS_DATE", date.trim());
    let _built_by = sh.push_env("OCM_ADDONS_BUILT_BY", built_by);

    if let Some(ref target_triple) = target {
        cmd!(sh, "cargo build --release --target {target_triple}").run()?;
    } else {
        cmd!(sh, "cargo build --release").run()?;
    }

    let dist_dir = project_root().join("dist");
    sh.create_dir(&dist_dir)?;

    let binary_src = match target {
        Some(ref target_triple) => {
            project_root().join(format!("target/{}/release/{}", target_triple, BINARY))
        }
        None => project_root().join(format!("target/release/{}", BINARY)),
    };
    sh.copy_file(&binary_src, dist_dir.join(BINARY))?;

    let (os, arch) = platform(target.as_deref())?;
    let archive = format!("dist/{}_{}_{}_{}.tar.gz", BINARY, version, os, arch);

    cmd!(sh, "tar -czf {archive} -C dist {BINARY}")
        .run()
        .context("Failed to create tarball")?;

    println!("✅ Distribution package created: {}", archive);
    Ok(())
}

/// GOOS/GOARCH-style names for `target`, or for the host when absent. The
/// plug-in's updater looks for release assets named with these.
fn platform(target: Option<&str>) -> Result<(&'static str, &'static str)> {
    let (os, arch) = match target {
        Some(triple) => {
            let arch = triple.split('-').next().unwrap_or_default();
            let os = if triple.contains("linux") {
                "linux"
            } else if triple.contains("darwin") || triple.contains("apple") {
                "macos"
            } else if triple.contains("windows") {
                "windows"
            } else {
                bail!("unsupported target: {}", triple)
            };
            (os, arch)
        }
        None => (std::env::consts::OS, std::env::consts::ARCH),
    };

    let os = match os {
        "macos" => "darwin",
        "linux" => "linux",
        "windows" => "windows",
        other => bail!("unsupported operating system: {}", other),
    };

    let arch = match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "i686" | "x86" => "386",
        other => bail!("unsupported architecture: {}", other),
    };

    Ok((os, arch))
}

fn install(sh: &Shell, prefix: &str) -> Result<()> {
    println!("📥 Installing {} to {}...", BINARY, prefix);

    let binary = project_root().join(format!("target/release/{}", BINARY));
    if !binary.exists() {
        println!("Building release binary first...");
        cmd!(sh, "cargo build --release").run()?;
    }

    // `ocm` runs plug-ins named ocm-<name> found on PATH.
    let bin_dir = Path::new(prefix).join("bin");
    sh.create_dir(&bin_dir)?;

    let install_path = bin_dir.join(BINARY);
    sh.copy_file(&binary, &install_path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&install_path, std::fs::Permissions::from_mode(0o755))?;
    }

    println!("✅ Installed to: {}", install_path.display());
    println!("   Run it as: ocm addons --help");
    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    println!("🔍 Running CI checks...");

    println!("\n📝 Checking formatting...");
    format(sh, true)?;

    println!("\n🔧 Running clippy...");
    clippy(sh)?;

    println!("\n🧪 Running tests...");
    test(sh, false)?;

    println!("\n✅ All CI checks passed!");
    Ok(())
}

fn format(sh: &Shell, check: bool) -> Result<()> {
    if check {
        cmd!(sh, "cargo fmt --all -- --check").run()?;
        println!("✅ Code formatting is correct");
    } else {
        cmd!(sh, "cargo fmt --all").run()?;
        println!("✅ Code formatted");
    }
    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    cmd!(
        sh,
        "cargo clippy --all-targets --all-features -- -D warnings"
    )
    .run()?;
    println!("✅ Clippy checks passed");
    Ok(())
}

fn project_root() -> PathBuf {
    Path::new(&env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(1)
        .unwrap()
        .to_path_buf()
}
