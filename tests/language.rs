use std::{cell::RefCell, io::Write, rc::Rc};

use vscript::{Interpreter, RunError};

/// A clonable sink so a test can keep reading what the interpreter wrote.
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("output is UTF-8")
    }
}

fn run_capture(source: &str) -> (Result<(), RunError>, String) {
    let buffer = SharedBuffer::default();
    let mut interpreter = Interpreter::with_output(Box::new(buffer.clone()));
    let result = interpreter.run(source);

    (result, buffer.contents())
}

fn assert_output(source: &str, expected: &str) {
    let (result, output) = run_capture(source);

    if let Err(e) = result {
        panic!("Script failed: {e}\nSource: {source}");
    }
    assert_eq!(output, expected, "Source: {source}");
}

fn assert_runtime_error(source: &str, fragment: &str) {
    let (result, _) = run_capture(source);

    match result {
        Err(RunError::Runtime(e)) => {
            let rendered = e.to_string();
            assert!(rendered.contains(fragment),
                    "Expected runtime error containing '{fragment}', got '{rendered}'");
            assert!(rendered.starts_with("运行时错误（第 "),
                    "Runtime framing missing: '{rendered}'");
        },
        other => panic!("Expected a runtime error, got {other:?}\nSource: {source}"),
    }
}

#[test]
fn arithmetic_and_precedence() {
    assert_output("输出(1 + 2)", "3\n");
    assert_output("输出(1 + 2 * 3)", "7\n");
    assert_output("输出((1 + 2) * 3)", "9\n");
    assert_output("输出(10 / 4)", "2.5\n");
    assert_output("输出(-7 % 3)", "-1\n");
    assert_output("输出(2 < 3)", "真\n");
    assert_output("输出(非 假)", "真\n");
}

#[test]
fn string_concatenation() {
    assert_output("输出(\"你好\" + \"，世界\")", "你好，世界\n");
    assert_runtime_error("输出(\"你好\" + 1)", "操作数必须是两个数字或两个字符串");
}

#[test]
fn let_declares_and_assignment_updates() {
    assert_output("就是 x = 10 x = x + 5 输出(x)", "15\n");
    assert_output("就是 x 输出(x)", "空\n");
    assert_output("就是 a = 1 就是 b = 2 a = b = 7 输出(a) 输出(b)", "7\n7\n");
    assert_output("就是 x = 1 就是 y = (x = 5) 输出(y)", "5\n");
}

#[test]
fn blocks_scope_their_declarations() {
    assert_output("就是 x = \"全局\" { 就是 x = \"局部\" 输出(x) } 输出(x)",
                  "局部\n全局\n");
}

#[test]
fn closures_see_later_mutations_of_captured_bindings() {
    assert_output("就是 x = 10 函数 f(){ 返回 x } x = 20 输出(f())", "20\n");
}

#[test]
fn closures_keep_their_defining_environment_alive() {
    let source = r#"
        函数 造计数器() {
            就是 n = 0
            函数 增() {
                n = n + 1
                返回 n
            }
            返回 增
        }
        就是 数 = 造计数器()
        输出(数())
        输出(数())
        输出(数())
    "#;

    assert_output(source, "1\n2\n3\n");
}

#[test]
fn recursion() {
    assert_output("函数 fib(n){ 如果 (n < 2) 返回 n 返回 fib(n-1) + fib(n-2) } 输出(fib(10))",
                  "55\n");
}

#[test]
fn functions_without_return_yield_null() {
    assert_output("函数 无() { } 输出(无())", "空\n");
    assert_output("函数 空手(x) { 如果 (x) 返回 } 输出(空手(真))", "空\n");
}

#[test]
fn return_unwinds_out_of_loops() {
    let source = r#"
        函数 找第一个大的(xs) {
            对于 x 在 xs {
                如果 (x > 1) 返回 x
            }
            返回 空
        }
        输出(找第一个大的([1, 2, 3]))
    "#;

    assert_output(source, "2\n");
}

#[test]
fn for_loops_iterate_arrays_in_order() {
    assert_output("对于 i 在 范围(0, 3) { 输出(i) }", "0\n1\n2\n");
    assert_output("对于 x 在 [5, \"六\", 空] { 输出(x) }", "5\n六\n空\n");
    assert_output("对于 i 在 [] { 输出(i) }", "");
}

#[test]
fn for_loop_iterable_must_be_an_array() {
    assert_runtime_error("对于 i 在 5 { 输出(i) }", "'对于' 循环需要一个数组");
}

#[test]
fn conditionals_follow_truthiness() {
    assert_output("如果 (空) 输出(1) 否则 输出(2)", "2\n");
    assert_output("如果 (0) 输出(\"零为真\")", "零为真\n");
    assert_output("如果 (\"\") 输出(\"空串为真\")", "空串为真\n");
    assert_output("如果 (假) 输出(1) 否则 输出(2)", "2\n");
}

#[test]
fn logical_operators_do_not_short_circuit() {
    // Both operands are always evaluated before truthiness is combined;
    // this pins the observable behavior.
    let source = r#"
        函数 喊(x) {
            输出(x)
            返回 假
        }
        如果 (喊(1) 并 喊(2)) { 输出(3) }
    "#;
    assert_output(source, "1\n2\n");

    let source = r#"
        函数 真话(x) {
            输出(x)
            返回 真
        }
        如果 (真话(1) 或 真话(2)) { 输出(3) }
    "#;
    assert_output(source, "1\n2\n3\n");
}

#[test]
fn operands_evaluate_left_to_right() {
    let source = r#"
        函数 记(x) {
            输出(x)
            返回 x
        }
        输出(记(1) + 记(2))
    "#;

    assert_output(source, "1\n2\n3\n");
}

#[test]
fn equality_rules() {
    assert_output("输出(空 == 空)", "真\n");
    assert_output("输出(空 == 0)", "假\n");
    assert_output("输出(1 == 1)", "真\n");
    assert_output("输出(\"一\" == \"一\")", "真\n");
    assert_output("输出(1 != 2)", "真\n");

    // Arrays compare by identity, not by contents.
    assert_output("就是 a = [1, 2] 就是 b = [1, 2] 输出(a == b) 输出(a == a)",
                  "假\n真\n");
}

#[test]
fn division_by_zero_reports_and_prints_nothing() {
    let (result, output) = run_capture("输出(1 / 0)");

    match result {
        Err(RunError::Runtime(e)) => assert!(e.to_string().contains("除数不能为零")),
        other => panic!("Expected a runtime error, got {other:?}"),
    }
    assert_eq!(output, "");
}

#[test]
fn arithmetic_type_errors() {
    assert_runtime_error("输出(1 - \"一\")", "操作数必须是数字");
    assert_runtime_error("输出(-\"一\")", "操作数必须是数字");
    assert_runtime_error("输出(真 < 假)", "操作数必须是数字");
}

#[test]
fn undefined_variables() {
    assert_runtime_error("输出(不存在)", "未定义的变量 '不存在'");
    assert_runtime_error("不存在 = 1", "未定义的变量 '不存在'");
}

#[test]
fn call_errors() {
    assert_runtime_error("\"不是函数\"(1)", "只能调用函数");
    assert_runtime_error("函数 f(a, b) { } f(1)", "期望 2 个参数但得到 1 个");
    assert_runtime_error("输出(1, 2)", "期望 1 个参数但得到 2 个");
}

#[test]
fn builtin_range() {
    assert_output("输出(范围(0, 3))", "[0, 1, 2]\n");
    assert_output("输出(范围(3, 3))", "[]\n");
    assert_output("输出(范围(5, 2))", "[]\n");
    assert_output("输出(范围(0.5, 3))", "[0.5, 1.5, 2.5]\n");
    assert_runtime_error("范围(\"一\", 3)", "范围函数需要两个数字参数");
}

#[test]
fn builtin_length() {
    assert_output("输出(长度([1, 2, 3]))", "3\n");
    assert_output("输出(长度([]))", "0\n");
    assert_output("输出(长度(\"你好\"))", "2\n");
    assert_output("输出(长度(\"\"))", "0\n");
    assert_runtime_error("长度(5)", "长度函数需要数组或字符串参数");
}

#[test]
fn builtin_type() {
    assert_output("输出(类型(1))", "数字\n");
    assert_output("输出(类型(\"一\"))", "字符串\n");
    assert_output("输出(类型(真))", "布尔\n");
    assert_output("输出(类型(空))", "空\n");
    assert_output("输出(类型([1]))", "数组\n");
    assert_output("函数 f() { } 输出(类型(f))", "函数\n");
    assert_output("输出(类型(输出))", "函数\n");
}

#[test]
fn value_rendering() {
    assert_output("输出(3.0)", "3\n");
    assert_output("输出(0.5)", "0.5\n");
    assert_output("输出(真) 输出(假) 输出(空)", "真\n假\n空\n");
    assert_output("输出([1, \"二\", 真, 空])", "[1, 二, 真, 空]\n");
    assert_output("函数 f() { } 输出(f)", "<函数 f>\n");
    assert_output("就是 打 = 输出 打(\"经由别名\")", "经由别名\n");
}

#[test]
fn comments_are_ignored() {
    assert_output("输出(1) // 行注释\n/* 块\n注释 */ 输出(2)", "1\n2\n");
}

#[test]
fn parse_errors_use_the_report_framing() {
    let (result, _) = run_capture("就是 = 1");
    match result {
        Err(RunError::Parse(e)) => {
            assert_eq!(e.to_string(), "第 1 行，第 4 列，在 '=' 处：期望变量名");
        },
        other => panic!("Expected a parse error, got {other:?}"),
    }

    let (result, _) = run_capture("输出(1");
    match result {
        Err(RunError::Parse(e)) => {
            assert!(e.to_string().contains("文件末尾"));
        },
        other => panic!("Expected a parse error, got {other:?}"),
    }
}

#[test]
fn lex_errors_abort_the_unit() {
    let (result, output) = run_capture("输出(1) 就是 x = \"断了");
    assert!(matches!(result, Err(RunError::Lex(_))));

    // Scanning fails before anything runs.
    assert_eq!(output, "");
}

#[test]
fn runtime_errors_carry_token_positions() {
    let (result, _) = run_capture("就是 x = 1\n输出(x + 真)");
    match result {
        Err(RunError::Runtime(e)) => {
            assert_eq!(e.to_string(),
                       "运行时错误（第 2 行，第 6 列）：操作数必须是两个数字或两个字符串");
        },
        other => panic!("Expected a runtime error, got {other:?}"),
    }
}

#[test]
fn state_survives_a_failed_unit() {
    let buffer = SharedBuffer::default();
    let mut interpreter = Interpreter::with_output(Box::new(buffer.clone()));

    interpreter.run("就是 x = 1").unwrap();
    assert!(interpreter.run("输出(不存在)").is_err());
    interpreter.run("输出(x)").unwrap();

    assert_eq!(buffer.contents(), "1\n");
}
