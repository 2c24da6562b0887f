use gusl::{
    describe,
    describe::{MAX_DESCRIBED_LEN, describe_expression},
    utils::Error,
};

#[test]
fn last_term_equivalents() {
    for program in ["c", "1o", "ww", "nPo"] {
        let sentence = describe(program).unwrap();
        assert!(
            sentence.ends_with("is the last term."),
            "`{program}` was described as `{sentence}`"
        );
    }
}

#[test]
fn binary_templates_name_operand_roles() {
    assert_eq!(
        describe_expression("p").unwrap(),
        "the sum of the last term and the penultimate term"
    );
    assert_eq!(
        describe_expression("m").unwrap(),
        "the difference between the penultimate term and the last term"
    );
    assert_eq!(
        describe_expression("2t").unwrap(),
        "the product of two with the last term"
    );
    assert_eq!(
        describe_expression("3d").unwrap(),
        "the integer part of the quotient when the last term is divided by three"
    );
    assert_eq!(
        describe_expression("4r").unwrap(),
        "the remainder when the last term is divided by four"
    );
    assert_eq!(
        describe_expression("n2e").unwrap(),
        "the result of raising the number of the new term to the power of two"
    );
}

#[test]
fn nested_tree_from_the_right() {
    assert_eq!(
        describe("8:tnm").unwrap(),
        "each new term is the difference between the product of ten with eight and the number of the new term."
    );
}

#[test]
fn unary_templates() {
    assert_eq!(
        describe_expression("nP").unwrap(),
        "the prime whose position in the sequence of primes is the number of the new term"
    );
    assert_eq!(
        describe_expression("F").unwrap(),
        "the factorial of the last term"
    );
}

#[test]
fn duplicate_reuses_subtree_once() {
    assert_eq!(
        describe_expression("ct").unwrap(),
        "the product of the last term with the last term"
    );
    // The copied subtree `1p` is consumed once: the `m` below still sees the penultimate term.
    assert_eq!(
        describe_expression("1pctm").unwrap(),
        "the difference between the penultimate term and the product of the sum of one and the last term with the sum of one and the last term"
    );
}

#[test]
fn swap_exchanges_operands() {
    assert_eq!(
        describe_expression("w").unwrap(),
        "the penultimate term"
    );
    assert_eq!(
        describe_expression("wm").unwrap(),
        "the difference between the last term and the penultimate term"
    );
    assert_eq!(
        describe_expression("3wd").unwrap(),
        "the integer part of the quotient when three is divided by the last term"
    );
}

#[test]
fn discard_drops_a_subtree() {
    assert_eq!(
        describe_expression("2po").unwrap(),
        "the penultimate term"
    );
    assert_eq!(
        describe_expression("ooo").unwrap(),
        "the ante-ante-penultimate term"
    );
}

#[test]
fn unknown_atoms_are_reported() {
    assert_eq!(
        describe("2q"),
        Err(Error::UnknownAtom {
            found: 'q',
            position: 1
        })
    );
}

#[test]
fn long_programs_are_refused() {
    let longest = format!("{}1p", "w".repeat(MAX_DESCRIBED_LEN - 2));
    assert!(describe(&longest).is_ok());

    let program = "1p".repeat(10_000);
    assert_eq!(
        describe(&program),
        Err(Error::ProgramTooLong {
            len: 20_000,
            max: MAX_DESCRIBED_LEN
        })
    );
}
