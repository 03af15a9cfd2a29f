fn main() {
	// the addon delay-imports this from whatever the executable ends up being called
	println!("cargo:rustc-link-arg-bins=/EXPORT:host_answer");
}
