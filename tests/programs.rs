use reckon::interpreter::Interpreter;

fn eval(line: &str) -> f64 {
    Interpreter::new().run(line).unwrap()
}

#[test]
fn subtraction_is_left_associative() {
    assert_eq!(eval("2 - 3 - 4"), -5.0);
}

#[test]
fn power_is_right_associative() {
    assert_eq!(eval("2 ^ 3 ^ 2"), 512.0);
}

#[test]
fn precedence() {
    assert_eq!(eval("2 + 3 * 4"), 14.0);
    assert_eq!(eval("(2 + 3) * 4"), 20.0);
    assert_eq!(eval("2 * 3 ^ 2"), 18.0);
    assert_eq!(eval("10 / 4"), 2.5);
}

// Negation is parsed below `^`, so the minus belongs to the base.
#[test]
fn negation_binds_tighter_than_power() {
    assert_eq!(eval("-2 ^ 2"), 4.0);
    assert_eq!(eval("-(2 ^ 2)"), -4.0);
    assert_eq!(eval("2 ^ -1"), 0.5);
    assert_eq!(eval("--3"), 3.0);
}

#[test]
fn real_valued_power() {
    assert_eq!(eval("4 ^ 0.5"), 2.0);
    assert_eq!(eval("2 ^ 10"), 1024.0);
}

#[test]
fn numbers() {
    assert_eq!(eval("3.25"), 3.25);
    assert_eq!(eval("1."), 1.0);
    assert_eq!(eval("007"), 7.0);
}

#[test]
fn assignment_persists() {
    let mut interp = Interpreter::new();
    assert_eq!(interp.run("x = 5").unwrap(), 5.0);
    assert_eq!(interp.run("x + 1").unwrap(), 6.0);
    assert_eq!(interp.get_global("x"), Some(5.0));
}

#[test]
fn chained_assignment() {
    let mut interp = Interpreter::new();
    assert_eq!(interp.run("a = b = 3").unwrap(), 3.0);
    assert_eq!(interp.get_global("a"), Some(3.0));
    assert_eq!(interp.get_global("b"), Some(3.0));
}

#[test]
fn identifiers() {
    let mut interp = Interpreter::new();
    interp.run("_rate_2 = 2").unwrap();
    interp.run("Rate = 10").unwrap();
    assert_eq!(interp.run("_rate_2 ^ 3 + Rate").unwrap(), 18.0);
}

#[test]
fn last_result() {
    let mut interp = Interpreter::new();
    assert_eq!(interp.last_result(), 0.0);
    assert_eq!(interp.run("$ + 1").unwrap(), 1.0);

    assert_eq!(interp.run("3 + 4").unwrap(), 7.0);
    assert_eq!(interp.run("$ * 2").unwrap(), 14.0);
    assert_eq!(interp.last_result(), 14.0);
    assert_eq!(interp.get_global("$"), Some(14.0));
}

#[test]
fn left_operand_runs_first() {
    let mut interp = Interpreter::new();
    assert_eq!(interp.run("(x = 2) + x").unwrap(), 4.0);
}

#[test]
fn same_line_same_result() {
    let mut interp = Interpreter::new();
    interp.run("x = 6").unwrap();
    let first = interp.run("x * 7 - 2").unwrap();
    let second = interp.run("x * 7 - 2").unwrap();
    assert_eq!(first, 40.0);
    assert_eq!(first, second);
}

#[test]
fn whitespace() {
    assert_eq!(eval("\t1+\n 2  "), 3.0);
    assert_eq!(eval("((1))"), 1.0);
}
