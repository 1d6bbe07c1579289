mod style_tests;
