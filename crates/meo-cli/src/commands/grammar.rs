//! Print the grammar rules.

pub fn run() {
    println!("{}", meo_expr::language().grammar());
}
