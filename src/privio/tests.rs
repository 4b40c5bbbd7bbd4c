mod privio_test;
