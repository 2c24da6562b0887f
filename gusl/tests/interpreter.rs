use gusl::{
    atom::{ALPHABET, Atom, AtomKind},
    math::MAX_FACTORIAL,
    vm::{EvalError, Status, interpret},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn run(stack: &[i32], program: &str) -> Status {
    let mut stack = stack.to_vec();
    interpret(&mut stack, program, false)
}

fn random_program(rng: &mut impl Rng, len: usize) -> String {
    let symbols: Vec<char> = ALPHABET.chars().collect();
    (0..len)
        .map(|_| symbols[rng.random_range(0..symbols.len())])
        .collect()
}

#[test]
fn adds_two_literals() {
    assert_eq!(run(&[], "12p"), Status::Ok(3));
}

#[test]
fn add_on_single_value_underflows() {
    assert_eq!(
        run(&[5], "p"),
        Status::Underflow {
            atom: Atom::Add,
            position: 0
        }
    );
}

#[test]
fn underflow_stops_before_popping() {
    let mut stack = vec![9];
    let status = interpret(&mut stack, "tp", false);
    assert!(status.is_underflow());
    assert_eq!(stack, vec![9], "the failing atom must not consume its operand");
}

#[test]
fn division_by_zero_is_an_error() {
    assert_eq!(
        run(&[], "111md"),
        Status::Error(EvalError::DivisionByZero { op: AtomKind::Div })
    );
    assert_eq!(
        run(&[], "511mr"),
        Status::Error(EvalError::DivisionByZero { op: AtomKind::Rem })
    );
}

#[test]
fn asymmetric_operators_apply_below_then_top() {
    assert_eq!(run(&[], "52m"), Status::Ok(3));
    assert_eq!(run(&[], "92d"), Status::Ok(4));
    assert_eq!(run(&[], "72r"), Status::Ok(1));
    assert_eq!(run(&[], "23e"), Status::Ok(8));
    assert_eq!(run(&[10, 4], "m"), Status::Ok(6));
}

#[test]
fn division_truncates_toward_zero() {
    assert_eq!(run(&[-7], "2d"), Status::Ok(-3));
    assert_eq!(run(&[-7], "2r"), Status::Ok(-1));
    assert_eq!(run(&[7, -2], "d"), Status::Ok(-3));
}

#[test]
fn stack_shape_atoms() {
    let mut stack = vec![];
    assert_eq!(interpret(&mut stack, "12w", false), Status::Ok(1));
    assert_eq!(stack, vec![2, 1]);

    let mut stack = vec![];
    assert_eq!(interpret(&mut stack, "3c", false), Status::Ok(3));
    assert_eq!(stack, vec![3, 3]);

    let mut stack = vec![4, 8];
    assert_eq!(interpret(&mut stack, "o", false), Status::Ok(4));
    assert_eq!(stack, vec![4]);

    assert!(run(&[1], "w").is_underflow());
    assert!(run(&[], "c").is_underflow());
    assert!(run(&[], "o").is_underflow());
}

#[test]
fn empty_stack_after_run_is_an_error() {
    assert_eq!(run(&[1], "o"), Status::Error(EvalError::EmptyResult));
    assert_eq!(run(&[], ""), Status::Error(EvalError::EmptyResult));
}

#[test]
fn ordinal_is_captured_at_start() {
    assert_eq!(run(&[], "n"), Status::Ok(1));
    assert_eq!(run(&[7, 7, 7], "n"), Status::Ok(4));
    // The second `n` still sees the initial length, not the grown stack.
    assert_eq!(run(&[], "nnp"), Status::Ok(2));
}

#[test]
fn factorial_matches_definition() {
    let mut expected = 1;
    for n in 1..=MAX_FACTORIAL {
        expected *= n;
        assert_eq!(run(&[n], "F"), Status::Ok(expected), "{n}!");
    }
}

#[test]
fn factorial_of_thirteen_is_rejected() {
    assert_eq!(
        run(&[13], "F"),
        Status::Error(EvalError::FactorialOutOfRange { n: 13, max: 12 })
    );
}

#[test]
fn nth_prime_bounds() {
    assert_eq!(run(&[], "nP"), Status::Ok(2));
    assert_eq!(run(&[], "5P"), Status::Ok(11));
    assert_eq!(run(&[100], "P"), Status::Ok(541));
    assert_eq!(
        run(&[101], "P"),
        Status::Error(EvalError::PrimeOutOfRange {
            index: 101,
            max: 100
        })
    );
    assert!(run(&[0], "P").is_error());
}

#[test]
fn overflow_never_wraps() {
    let overflow = |op| Status::Error(EvalError::Overflow { op });
    assert_eq!(run(&[i32::MAX], "1p"), overflow(AtomKind::Add));
    assert_eq!(run(&[i32::MIN], "1m"), overflow(AtomKind::Sub));
    assert_eq!(run(&[i32::MAX], "2t"), overflow(AtomKind::Mul));
    assert_eq!(run(&[i32::MIN, -1], "d"), overflow(AtomKind::Div));
    assert_eq!(run(&[i32::MIN, -1], "r"), overflow(AtomKind::Rem));
    assert_eq!(run(&[3, 20], "e"), overflow(AtomKind::Pow));
}

#[test]
fn power_domain_errors() {
    assert_eq!(
        run(&[0, 0], "e"),
        Status::Error(EvalError::InvalidPower {
            base: 0,
            exponent: 0
        })
    );
    assert_eq!(run(&[2, -1], "e"), Status::Ok(0));
    assert_eq!(run(&[-3, -2], "e"), Status::Ok(0));
    assert_eq!(run(&[-1, -3], "e"), Status::Ok(-1));
    assert_eq!(run(&[], "2@e"), Status::Ok(65536));
}

#[test]
fn unknown_atom_is_an_error() {
    let status = run(&[], "1x");
    match status {
        Status::Error(EvalError::UnknownAtom(error)) => {
            assert!(error.is_unknown_atom());
            assert!(error.to_string().contains("`x` at position 1"));
        }
        other => panic!("expected an unknown atom error, got {other:?}"),
    }
}

#[test]
fn interpretation_is_deterministic() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x5eed);
    for _ in 0..2_000 {
        let len = rng.random_range(1..8);
        let program = random_program(&mut rng, len);
        let depth = rng.random_range(0..6);
        let stack: Vec<i32> = (0..depth).map(|_| rng.random_range(-50..50)).collect();

        let mut first = stack.clone();
        let mut second = stack.clone();
        let a = interpret(&mut first, &program, false);
        let b = interpret(&mut second, &program, false);
        assert_eq!(a, b, "program `{program}` on {stack:?}");
        assert_eq!(first, second, "program `{program}` on {stack:?}");
    }
}

#[test]
fn verbose_run_matches_quiet_run() {
    assert_eq!(run(&[2, 4, 6], "2p"), {
        let mut stack = vec![2, 4, 6];
        interpret(&mut stack, "2p", true)
    });
}
