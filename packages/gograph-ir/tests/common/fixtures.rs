//! Go source fixtures

/// Minimal manifest for `module_path`
pub fn fixture_go_mod(module_path: &str) -> String {
    format!("module {module_path}\n\ngo 1.21\n")
}

/// Manifest with one direct and one indirect requirement plus a replace
pub fn fixture_go_mod_with_deps(module_path: &str) -> String {
    format!(
        r#"module {module_path}

go 1.22

toolchain go1.22.3

require (
	github.com/pkg/errors v0.9.1
	golang.org/x/sys v0.15.0 // indirect
)

replace github.com/pkg/errors => ../errors
"#
    )
}

/// `package name` followed by `n` empty functions `F0..Fn`
pub fn fixture_n_functions(package: &str, n: usize) -> String {
    let funcs: String = (0..n).map(|i| format!("func F{i}() {{}}\n\n")).collect();
    format!("package {package}\n\n{funcs}")
}

/// `func Add(a, b int) int`
pub fn fixture_add(package: &str) -> String {
    format!("package {package}\n\nfunc Add(a, b int) int {{\n\treturn a + b\n}}\n")
}

/// `func Run()` with one function literal assigned in its body
pub fn fixture_run(package: &str) -> String {
    format!(
        "package {package}\n\nfunc Run() {{\n\tf := func() int {{ return Add(1, 2) }}\n\t_ = f\n}}\n"
    )
}

/// A function holding `literals` sequential function literals
pub fn fixture_literals(package: &str, name: &str, literals: usize) -> String {
    let body: String = (0..literals)
        .map(|i| format!("\tf{i} := func() {{}}\n\t_ = f{i}\n"))
        .collect();
    format!("package {package}\n\nfunc {name}() {{\n{body}}}\n")
}

/// A struct using a `v2`-aliased import
pub fn fixture_aliased_struct(package: &str) -> String {
    format!(
        r#"package {package}

import "example.com/pkg/v2"

type Holder struct {{
	Thing  v2.Thing
	Ptr    *v2.Thing
	Things map[string][]v2.Thing
}}
"#
    )
}

/// Source the parse step rejects
pub fn fixture_broken(package: &str) -> String {
    format!("package {package}\n\nfunc broken( {{\n")
}
