mod property_test;
