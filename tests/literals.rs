#[macro_use]
mod cases;

test_case!(
    simple_int,
    input: "42",
    formatted: "42",
    value: "42",
);

test_case!(
    leading_zeros,
    input: "007",
    formatted: "7",
    value: "7",
);

test_case!(
    int_past_i64_max_clamps,
    input: "99999999999999999999",
    formatted: "9223372036854775807",
    value: "9.22337e+18",
);

test_case!(
    simple_float,
    input: "3.25",
    formatted: "3.25",
    value: "3.25",
);

test_case!(
    float_without_fraction_digits,
    input: "1.",
    formatted: "1",
    value: "1",
);

test_case!(
    float_trailing_zeros_dropped,
    input: "2.500",
    formatted: "2.5",
    value: "2.5",
);

// Exponent renderings such as `1e+20` are not valid input, so those are
// covered by the formatter's own tests.

test_case!(
    negative_float,
    input: "-2.5",
    formatted: "-2.5",
    value: "-2.5",
);

test_case!(
    double_negation_cancels,
    input: "--5",
    formatted: "5",
    value: "5",
);

test_case!(
    plus_signs_are_ignored,
    input: "+-+7",
    formatted: "-7",
    value: "-7",
);
