//! Standard library: precomputed notation addressable by `include NAME`.
//!
//! Entries are stored already formatted and are spliced into the including
//! graph as-is.

#[rustfmt::skip]
const MODULES: &[(&str, &[&str])] = &[
    ("clamp", &[
        r"c_{lamp}\left(x,a,b\right)=\min\left(\max\left(x,a\right),b\right)",
    ]),
    ("lerp", &[
        r"l_{erp}\left(a,b,t\right)=a+\left(b-a\right)\cdot t",
    ]),
    ("bool", &[
        r"n_{ot}\left(a\right)=1-a",
        r"a_{nd}\left(a,b\right)=a\cdot b",
        r"o_{r}\left(a,b\right)=\max\left(a,b\right)",
        r"x_{or}\left(a,b\right)=\operatorname{mod}\left(a+b,2\right)",
    ]),
    ("vec", &[
        r"v_{len}\left(x,y\right)=\sqrt{x^2+y^2}",
        r"v_{angle}\left(x,y\right)=\arctan\left(y,x\right)",
    ]),
];

/// Notation fragments of the standard library module `name`.
pub fn lookup(name: &str) -> Option<&'static [&'static str]> {
    MODULES
        .iter()
        .find(|(module, _)| *module == name)
        .map(|(_, fragments)| *fragments)
}

/// Names of every standard library module.
pub fn modules() -> impl Iterator<Item = &'static str> {
    MODULES.iter().map(|(name, _)| *name)
}
