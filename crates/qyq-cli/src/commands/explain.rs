//! Long description of how a cast is read

/// Printed by `qyq explain`
pub const EXPLANATION: &str = "\
QUANTUM YI QING - cast a Yi Qing oracle from quantum measurement counts.

Traditionally the cast is made with yarrow stalks. In the three-coin method
each of the six lines comes from tossing three coins: heads counts 3, tails
counts 2, and the sum names the line:

    6 - Yin changing        ***XXX***
    7 - Yang unchanging     *********
    8 - Yin unchanging      ***   ***
    9 - Yang changing       ***000***

Here each toss is a measured 3-bit register. A 1-bit is heads, a 0-bit is
tails. The circuit is run for many shots per line and the most frequently
measured 3-bit value is that line's toss. Lines are cast bottom (line 1) to
top (line 6) and drawn top first.

The derivative hexagram stands beside the primary one: every changing line
becomes its opposite, unchanging lines stay as they are.

When two bit patterns share the highest count the tie is settled by value:

    identical value - don't care
    6 vs 7          - 7
    6 vs 8          - 8
    6 vs 9          - 6
    7 vs 8          - 8
    7 vs 9          - 9
    8 vs 9          - 9

If more than two patterns share the highest count, only the first and last
in ascending bit order are compared.

Each cast can be saved as a ';'-delimited record (header with the context
label and the eight bit patterns, then one timestamped row of counts per
line) and drawn again later with `qyq draw`.
";

/// Execute `qyq explain`
pub fn execute() {
    print!("{}", EXPLANATION);
}
