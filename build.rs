use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8(output.stdout).ok()?;
    Some(stdout.trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_default();
    let date_args = ["log", "-1", "--format=%cd", "--date=format:%Y-%m-%d %H:%M"];
    let commit_date = git(&date_args).unwrap_or_default();

    // A release build is a clean tree whose HEAD carries the version tag
    let is_dirty = git(&["status", "--porcelain"]).is_some_and(|s| !s.is_empty());
    let version = env!("CARGO_PKG_VERSION");
    let prefixed = format!("v{}", version);
    let tagged = git(&["tag", "--points-at", "HEAD"])
        .is_some_and(|tags| tags.lines().any(|tag| tag == version || tag == prefixed));

    println!("cargo:rustc-env=SLIDEZ_GIT_HASH={}", hash);
    println!("cargo:rustc-env=SLIDEZ_GIT_DATE={}", commit_date);
    println!("cargo:rustc-env=SLIDEZ_IS_RELEASE={}", tagged && !is_dirty);
}
