macro_rules! mml {
    (math, $child:expr $(,)?) => {{
        let mut node = crate::FormulaNode::new("math");
        node.children.push($child);
        node
    }};

    (ci, $name:literal) => {{
        let mut node = crate::FormulaNode::new("ci");
        node.text.push_str($name);
        node
    }};

    (cn, $value:literal) => {{
        let mut node = crate::FormulaNode::new("cn");
        node.text.push_str($value);
        node
    }};

    (apply csymbol $name:literal $(, $operand:expr)* $(,)?) => {{
        let mut node = crate::FormulaNode::new("apply");
        let mut operator = crate::FormulaNode::new("csymbol");
        operator.text.push_str($name);
        node.children.push(operator);
        $( node.children.push($operand); )*
        node
    }};

    (apply $op:literal $(, $operand:expr)* $(,)?) => {{
        let mut node = crate::FormulaNode::new("apply");
        node.children.push(crate::FormulaNode::new($op));
        $( node.children.push($operand); )*
        node
    }};

    ($tag:literal, $child:expr $(,)?) => {{
        let mut node = crate::FormulaNode::new($tag);
        node.children.push($child);
        node
    }};
}

macro_rules! var {
    ($name:literal) => { crate::Expression::Variable($name.to_owned()) };
}

macro_rules! int {
    ($i:literal) => { crate::Expression::Number(crate::Number::Int($i)) };
}

macro_rules! rat {
    ($n:literal, $d:literal) => { crate::Number::Rational($n, $d) };
}

macro_rules! dec {
    ($l:literal) => {
        crate::Number::Decimal(
            <rust_decimal::Decimal as std::str::FromStr>::from_str(stringify!($l)).unwrap()
        )
    };
}

macro_rules! sum {
    ($($term:expr),* $(,)?) => { crate::Expression::Sum(vec![ $($term),* ]) };
}

macro_rules! product {
    ($($factor:expr),* $(,)?) => { crate::Expression::Product(vec![ $($factor),* ]) };
}

macro_rules! power {
    ($base:expr, $exp:expr $(,)?) => {
        crate::Expression::Power(Box::new($base), Box::new($exp))
    };
}

macro_rules! render {
    ($expr:expr $(,)?) => {{
        let mut renderer = crate::renderers::AsciiRenderer::default();
        <crate::renderers::AsciiRenderer as crate::render::Renderer>::draw_all(&mut renderer, &$expr);
        renderer.lines
    }};
}

/// A complete definition document exercising every extracted field.
pub const NDWI_XML: &str = r#"<IndexDefinition>
  <Name>NDWI</Name>
  <AlternativeName>Normalized Difference Water Index</AlternativeName>
  <AlternativeName>Gao's NDWI</AlternativeName>
  <Metadata>
    <Description>Normalized Difference Water Index</Description>
    <ApplicationGroup>Water</ApplicationGroup>
    <ApplicationMolecularTarget>H2O</ApplicationMolecularTarget>
    <ApplicationSubtarget>Leaf water content</ApplicationSubtarget>
    <Species>All</Species>
    <Reference>Gao (1996)</Reference>
    <AdditionalInformation>Sensitive to canopy moisture</AdditionalInformation>
  </Metadata>
  <Wavelengths>
    <Band name="Green" min="550" max="550" unit="nm"/>
    <Band name="NIR" min="760" max="900" unit="nm"/>
  </Wavelengths>
  <MathML>
    <math xmlns="http://www.w3.org/1998/Math/MathML">
      <apply>
        <divide/>
        <apply><minus/><cn>550</cn><cn>860</cn></apply>
        <apply><plus/><cn>550</cn><cn>860</cn></apply>
      </apply>
    </math>
  </MathML>
</IndexDefinition>
"#;
