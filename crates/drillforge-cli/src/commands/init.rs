//! The `drill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create drillforge.toml
    if std::path::Path::new("drillforge.toml").exists() {
        println!("drillforge.toml already exists, skipping.");
    } else {
        std::fs::write("drillforge.toml", SAMPLE_CONFIG)?;
        println!("Created drillforge.toml");
    }

    // Create the starter syllabi
    std::fs::create_dir_all("syllabi")?;
    for (name, content) in [
        ("syllabi/ib-math-aa-sl.toml", IB_SYLLABUS),
        ("syllabi/sat.toml", SAT_SYLLABUS),
    ] {
        let path = std::path::Path::new(name);
        if path.exists() {
            println!("{name} already exists, skipping.");
        } else {
            std::fs::write(path, content)?;
            println!("Created {name}");
        }
    }

    println!("\nNext steps:");
    println!("  1. Edit drillforge.toml with your API key (or set DRILLFORGE_GEMINI_KEY)");
    println!("  2. Run: drill validate --syllabus syllabi");
    println!("  3. Run: drill practice");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# drillforge configuration

[providers.gemini]
type = "gemini"
api_key = "${GEMINI_API_KEY}"

[providers.ollama]
type = "ollama"
base_url = "http://localhost:11434"

default_provider = "gemini"
default_model = "gemini-2.5-flash"
default_temperature = 0.7
max_tokens = 2048
user_id = "local-user"
store_path = "./drillforge-store.json"
syllabus_dir = "./syllabi"
"#;

const IB_SYLLABUS: &str = r#"[syllabus]
id = "ib-math-aa-sl"
course = "IB"
name = "IB Mathematics: Analysis and Approaches SL"

[[units]]
id = "topic-1"
title = "Topic 1: Number and Algebra"

[[units.topics]]
id = "1.1"
title = "Operations with numbers (Scientific notation)"

[[units.topics]]
id = "1.2"
title = "Arithmetic sequences and series"

[[units.topics]]
id = "1.3"
title = "Geometric sequences and series"

[[units.topics]]
id = "1.4"
title = "Financial applications (Simple/Compound interest)"

[[units.topics]]
id = "1.5"
title = "Exponents and logarithms"

[[units.topics]]
id = "1.6"
title = "Binomial theorem"

[[units.topics]]
id = "1.7"
title = "Proofs (Deductive)"

[[units]]
id = "topic-2"
title = "Topic 2: Functions"

[[units.topics]]
id = "2.1"
title = "Concepts of functions (Domain, Range, Inverse)"

[[units.topics]]
id = "2.2"
title = "Graphing functions (Transformations)"

[[units.topics]]
id = "2.3"
title = "Composite functions"

[[units.topics]]
id = "2.4"
title = "Quadratic functions (Vertex, Axis of symmetry)"

[[units.topics]]
id = "2.5"
title = "Rational functions (Asymptotes)"

[[units.topics]]
id = "2.6"
title = "Exponential and Logarithmic functions"

[[units]]
id = "topic-3"
title = "Topic 3: Geometry and Trigonometry"

[[units.topics]]
id = "3.1"
title = "3D Coordinate geometry (Distance, Midpoint)"

[[units.topics]]
id = "3.2"
title = "Right-angled trigonometry (SOHCAHTOA)"

[[units.topics]]
id = "3.3"
title = "Non-right-angled trigonometry (Sine/Cosine rules)"

[[units.topics]]
id = "3.4"
title = "The Unit Circle & Radian measure"

[[units.topics]]
id = "3.5"
title = "Trigonometric functions (Sin, Cos, Tan graphs)"

[[units.topics]]
id = "3.6"
title = "Trigonometric identities (Double angle)"

[[units]]
id = "topic-4"
title = "Topic 4: Statistics and Probability"

[[units.topics]]
id = "4.1"
title = "Descriptive statistics (Mean, Median, Mode)"

[[units.topics]]
id = "4.2"
title = "Bivariate statistics (Regression line)"

[[units.topics]]
id = "4.3"
title = "Probability concepts (Venn diagrams, Tree diagrams)"

[[units.topics]]
id = "4.4"
title = "Discrete random variables"

[[units.topics]]
id = "4.5"
title = "Binomial distribution"

[[units.topics]]
id = "4.6"
title = "Normal distribution"

[[units]]
id = "topic-5"
title = "Topic 5: Calculus"

[[units.topics]]
id = "5.1"
title = "Limits and Derivatives (First principles)"

[[units.topics]]
id = "5.2"
title = "Rules of differentiation (Chain, Product, Quotient)"

[[units.topics]]
id = "5.3"
title = "Tangents and Normals"

[[units.topics]]
id = "5.4"
title = "Stationary points (Optimization)"

[[units.topics]]
id = "5.5"
title = "Integration (Anti-differentiation)"

[[units.topics]]
id = "5.6"
title = "Definite integrals (Area under curve)"

[[units.topics]]
id = "5.7"
title = "Kinematics (Displacement, Velocity, Acceleration)"
"#;

const SAT_SYLLABUS: &str = r#"[syllabus]
id = "sat"
course = "SAT"
name = "Digital SAT"

[[units]]
id = "SAT-MATH-1"
title = "Math: Heart of Algebra"

[[units.topics]]
id = "1.1"
title = "Linear equations in one variable"

[[units.topics]]
id = "1.2"
title = "Linear functions"

[[units.topics]]
id = "1.3"
title = "Systems of two linear equations in two variables"

[[units.topics]]
id = "1.4"
title = "Linear inequalities"

[[units]]
id = "SAT-MATH-2"
title = "Math: Problem Solving and Data Analysis"

[[units.topics]]
id = "2.1"
title = "Ratios, rates, and proportional relationships"

[[units.topics]]
id = "2.2"
title = "Percentages"

[[units.topics]]
id = "2.3"
title = "One-variable data: Distributions and measures of center"

[[units.topics]]
id = "2.4"
title = "Two-variable data: Scatterplots and models"

[[units.topics]]
id = "2.5"
title = "Probability and conditional probability"

[[units]]
id = "SAT-MATH-3"
title = "Math: Passport to Advanced Math"

[[units.topics]]
id = "3.1"
title = "Equivalent algebraic expressions"

[[units.topics]]
id = "3.2"
title = "Nonlinear equations in one variable"

[[units.topics]]
id = "3.3"
title = "Systems of equations in two variables"

[[units.topics]]
id = "3.4"
title = "Nonlinear functions"

[[units]]
id = "SAT-MATH-4"
title = "Math: Additional Topics"

[[units.topics]]
id = "4.1"
title = "Area and volume"

[[units.topics]]
id = "4.2"
title = "Lines, angles, and triangles"

[[units.topics]]
id = "4.3"
title = "Right triangles and trigonometry"

[[units.topics]]
id = "4.4"
title = "Circles"

[[units.topics]]
id = "4.5"
title = "Complex numbers"

[[units]]
id = "SAT-RW-1"
title = "R&W: Craft and Structure"

[[units.topics]]
id = "RW-1.1"
title = "Words in Context"

[[units.topics]]
id = "RW-1.2"
title = "Text Structure and Purpose"

[[units.topics]]
id = "RW-1.3"
title = "Cross-Text Connections"

[[units]]
id = "SAT-RW-2"
title = "R&W: Information and Ideas"

[[units.topics]]
id = "RW-2.1"
title = "Central Ideas and Details"

[[units.topics]]
id = "RW-2.2"
title = "Command of Evidence (Textual)"

[[units.topics]]
id = "RW-2.3"
title = "Command of Evidence (Quantitative)"

[[units.topics]]
id = "RW-2.4"
title = "Inferences"

[[units]]
id = "SAT-RW-3"
title = "R&W: Standard English Conventions"

[[units.topics]]
id = "RW-3.1"
title = "Boundaries (Sentences & Punctuation)"

[[units.topics]]
id = "RW-3.2"
title = "Form, Structure, and Sense (Grammar)"

[[units]]
id = "SAT-RW-4"
title = "R&W: Expression of Ideas"

[[units.topics]]
id = "RW-4.1"
title = "Rhetorical Synthesis"

[[units.topics]]
id = "RW-4.2"
title = "Transitions"
"#;
