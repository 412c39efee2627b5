// This binary crate is intentionally minimal.
// All network logic lives in the library (src/lib.rs and its modules).
// Run the demos with:
//   cargo run --example two_bit
//   cargo run --example xor
fn main() {
    println!("backprop-nn: a neuron-level feed-forward network with momentum backpropagation.");
    println!("Run `cargo run --example two_bit` to see the 2-bit classifier demo.");
}
