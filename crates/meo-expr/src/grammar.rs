//! Rules of the Meo expression subset.
//!
//! ```text
//! block     <- trivia line_end* stat (line_end+ stat)* line_end*
//! stat      <- assign / exp_stat
//! exp       <- or / conj                  (or, and, cmp, add, mul: left associative)
//! operand   <- neg / power
//! power     <- pow / value                (pow: right associative)
//! value     <- call / num / str / variable / parens
//! call      <- callee args
//! callee    <- call / variable / parens
//! ```
//!
//! Operators follow Lua precedence: `or` < `and` < comparison < `+ -` <
//! `* / %` < unary `- # not` < `^`.

use meo_peg::{
    CharSet, Expr, Grammar, Rule, any, ch, class, lit, many, many1, nl, range, set, term,
};

use crate::nodes::{
    Args, Assign, Binary, Block, Call, ExpStat, Name, Num, Op, Parens, Str, Unary, Variable,
};

/// Start rules of the built grammar.
pub(crate) struct Entries {
    pub block: Rule,
    pub exp: Rule,
}

fn word_start() -> CharSet {
    let mut set = CharSet::from_range('a', 'z');
    set.insert_range('A', 'Z');
    set.insert('_');
    set
}

fn word_char() -> CharSet {
    let mut set = word_start();
    set.insert_range('0', '9');
    set
}

/// `word` not followed by an identifier character.
fn keyword(word: &str) -> Expr {
    lit(word) >> !class(word_char())
}

pub(crate) fn build() -> (Grammar, Entries) {
    let mut g = Grammar::new();

    let comment = lit("--") >> (!ch('\n') >> any()).many();
    let space = set(" \t").many1() | comment;
    g.set_skip(space.clone());
    let trivia = g.add("trivia", space.many());
    let line_end = g.add("line_end", term(nl(-ch('\r') >> '\n')));

    // Tokens
    let digits = range('0', '9').many1();
    let num = g.add("num", digits.clone() >> -(ch('.') >> digits));
    let escape = ch('\\') >> any();
    let plain = !set("\"\\\n") >> any();
    let str_ = g.add("str", ch('"') >> (escape | plain).many() >> '"');
    let reserved = keyword("and") | keyword("or") | keyword("not");
    let name = g.add(
        "name",
        !reserved >> class(word_start()) >> class(word_char()).many(),
    );

    let unary_op = g.add("unary_op", ch('-') >> !ch('-') | '#' | keyword("not"));
    let pow_op = g.add("pow_op", ch('^'));
    let mul_op = g.add("mul_op", set("*/%"));
    let add_op = g.add("add_op", set("+-"));
    let cmp_op = g.add("cmp_op", lit("==") | "~=" | "<=" | ">=" | '<' | '>');
    let and_op = g.add("and_op", keyword("and"));
    let or_op = g.add("or_op", keyword("or"));

    // Values
    let exp = g.rule("exp");
    let variable = g.add("variable", name);
    let parens = g.add("parens", term('(') >> exp >> term(')'));
    let args = g.add(
        "args",
        term('(') >> -(exp >> (term(',') >> exp).many()) >> term(')'),
    );
    let callee = g.rule("callee");
    let call = g.add("call", callee >> args);
    g.define(callee, call | term(variable) | parens);
    let value = g.add(
        "value",
        call | term(num) | term(str_) | term(variable) | parens,
    );

    // Operators, loosest last
    let operand = g.rule("operand");
    let pow = g.add("pow", value >> term(pow_op) >> operand);
    let power = g.add("power", pow | value);
    let neg = g.add("neg", term(unary_op) >> operand);
    g.define(operand, neg | power);

    let product = g.rule("product");
    let mul = g.add("mul", product >> term(mul_op) >> operand);
    g.define(product, mul | operand);

    let sum = g.rule("sum");
    let add = g.add("add", sum >> term(add_op) >> product);
    g.define(sum, add | product);

    let compare = g.rule("compare");
    let cmp = g.add("cmp", compare >> term(cmp_op) >> sum);
    g.define(compare, cmp | sum);

    let conj = g.rule("conj");
    let and = g.add("and", conj >> term(and_op) >> compare);
    g.define(conj, and | compare);

    let or = g.add("or", exp >> term(or_op) >> conj);
    g.define(exp, or | conj);

    // Statements
    let assign = g.add(
        "assign",
        term(variable) >> term(ch('=') >> !ch('=')) >> exp,
    );
    let exp_stat = g.add("exp_stat", exp);
    let stat = g.add("stat", assign | exp_stat);
    let block = g.add(
        "block",
        trivia >> many(line_end) >> stat >> (many1(line_end) >> stat).many() >> many(line_end),
    );
    let expression = g.add("expression", trivia >> exp >> many(line_end));

    g.bind::<Num>(num);
    g.bind::<Str>(str_);
    g.bind::<Name>(name);
    for op in [unary_op, pow_op, mul_op, add_op, cmp_op, and_op, or_op] {
        g.bind::<Op>(op);
    }
    g.bind::<Variable>(variable);
    g.bind::<Parens>(parens);
    g.bind::<Args>(args);
    g.bind::<Call>(call);
    for binary in [pow, mul, add, cmp, and, or] {
        g.bind::<Binary>(binary);
    }
    g.bind::<Unary>(neg);
    g.bind::<Assign>(assign);
    g.bind::<ExpStat>(exp_stat);
    g.bind::<Block>(block);

    let entries = Entries {
        block,
        exp: expression,
    };
    (g, entries)
}
