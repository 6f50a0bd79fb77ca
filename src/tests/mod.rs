mod test_nullspace_auto;
