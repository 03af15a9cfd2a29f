fn main() {
	// must agree with DELAY_HOOK_HOST_BINARY when delay_hook is built
	println!("cargo:rustc-link-arg-cdylib=/DELAYLOAD:renamed_host_app.exe");
}
