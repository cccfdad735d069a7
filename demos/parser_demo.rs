use karyotype_check::parser::parse;
use karyotype_check::validation::validate;

fn main() {
    println!("=== Karyotype Parser Demo ===");

    let inputs = [
        "46,XX",
        "47,XY,+21",
        "46,XX,del(5)(q13q33)",
        "46,XX,t(9;22)(q34;q11.2)",
        "46,XY,der(22)t(9;22)(q34;q11.2)",
        "45,X[10]/46,XX[20]",
        "46,XX,r(1)(p36p42)",
        "47,XY,+der(22)t(11;22)(q23;q11.2)",
        "46,XX,del(5)(q)",
    ];

    for input in inputs {
        println!("\nInput: '{}'", input);
        match parse(input) {
            Ok(tree) => {
                println!("Parsed: {:?}", tree);
                let verdict = validate(&tree);
                if verdict.valid {
                    println!("Valid");
                } else {
                    for error in &verdict.errors {
                        println!("Error: {}", error);
                    }
                }
            }
            Err(err) => println!("Syntax error: {}", err),
        }
    }
}
