fn main() {
  // Без нативной библиотеки линковаться не с чем
  if std::env::var_os("CARGO_FEATURE_NATIVE").is_none() {
    return;
  }
  println!("cargo:rerun-if-env-changed=ORACLE_HOME");
  let oracle_home = match std::env::var("ORACLE_HOME") {
    Ok(home) => home,
    Err(_) => {
      println!("cargo:warning=Environment variable ORACLE_HOME not set, relying on the system linker path");
      return;
    }
  };
  if cfg!(windows) {
    println!("cargo:rustc-link-search={}/oci/lib/msvc", oracle_home);
  } else {
    println!("cargo:rustc-link-search={}/lib", oracle_home);
  }
}
